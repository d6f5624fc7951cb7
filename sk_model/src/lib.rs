//! Compiles parsed sokoban boards into transition-system models for a
//! symbolic model checker, prints them in the checker's input language and
//! explores them by brute force on small boards.

pub mod naming;

pub mod transition_system_model;
pub use transition_system_model::*;

pub mod compiler;
pub use compiler::*;

pub mod smv;
pub use smv::*;

pub mod smv_parser;
pub use smv_parser::*;

pub mod explorer;
pub use explorer::*;
