use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a model variable, table or derived predicate.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SKPath {
    pub name: String,
}

impl SKPath {
    pub fn from_string(s: &str) -> SKPath {
        SKPath {
            name: s.trim().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl From<&str> for SKPath {
    fn from(s: &str) -> Self {
        SKPath::from_string(s)
    }
}

impl From<String> for SKPath {
    fn from(s: String) -> Self {
        SKPath::from_string(&s)
    }
}

impl fmt::Display for SKPath {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "{}", self.name)
    }
}
