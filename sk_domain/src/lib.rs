//! The sokoban domain: boards, parsed entities and the predicate language
//! the model compiler speaks.

pub mod value;
pub use value::*;

pub mod path;
pub use path::*;

pub mod board;
pub use board::*;

pub mod parser;
pub use parser::*;

pub mod predicate;
pub use predicate::*;

pub mod named_predicate;
pub use named_predicate::*;

pub mod variable;
pub use variable::*;

pub mod state;
pub use state::*;

use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;

pub type SKResult<T> = std::result::Result<T, SKError>;

#[derive(Debug, Error)]
pub enum SKError {
    #[error("malformed board: {0}")]
    MalformedBoard(String),
    #[error("board has no agent cell")]
    NoAgent,
    #[error("board has more than one agent cell: {0} and {1}")]
    MultipleAgents(Position, Position),
    #[error("compiler invariant violated: {0}")]
    Invariant(String),
    #[error("verification engine not available: {0}")]
    EngineUnavailable(String),
    #[error("verification engine timed out after {0:?}")]
    Timeout(Duration),
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Oh No: {0}")]
    No(String),
}

impl From<serde_json::Error> for SKError {
    fn from(e: serde_json::Error) -> Self {
        SKError::from_any(e)
    }
}

impl SKError {
    pub fn from_any<T: Display>(x: T) -> SKError {
        SKError::No(format!("{}", x))
    }

    pub fn invariant<T: Display>(x: T) -> SKError {
        SKError::Invariant(format!("{}", x))
    }

    /// Errors that mean the board could not be checked at all, as opposed
    /// to a model that was built but failed somewhere downstream.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SKError::MalformedBoard(_) | SKError::NoAgent | SKError::MultipleAgents(..)
        )
    }
}

#[cfg(test)]
mod tests_domain {
    use super::*;

    #[test]
    fn error_messages() {
        let e = SKError::MultipleAgents(Position::new(1, 2), Position::new(3, 4));
        assert_eq!(
            e.to_string(),
            "board has more than one agent cell: (1, 2) and (3, 4)"
        );
        assert!(e.is_input_error());
        assert!(!SKError::invariant("box 3").is_input_error());
        assert_eq!(SKError::from_any("boom").to_string(), "Oh No: boom");
    }
}
