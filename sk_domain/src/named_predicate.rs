use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simply a predicate with a name (path) attached.

#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct NamedPredicate {
    pub path: SKPath,
    pub predicate: Predicate,
}

impl NamedPredicate {
    pub fn new(path: SKPath, predicate: Predicate) -> Self {
        Self { path, predicate }
    }

    pub fn path(&self) -> &SKPath {
        &self.path
    }
}

impl fmt::Display for NamedPredicate {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "{} := {}", self.path, self.predicate)
    }
}
