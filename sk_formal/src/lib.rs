//! Drives the external model checker over compiled boards and turns its
//! output into verdicts.

pub mod config;
pub use config::*;

pub mod task;
pub use task::*;

pub mod interpret;
pub use interpret::*;

pub mod engine;
pub use engine::*;

pub mod decompose;
pub use decompose::*;

pub mod batch;
pub use batch::*;
