//! Concrete valuations, used to evaluate predicates outside the engine.

use super::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookups a predicate needs while it is evaluated.
pub trait Valuation {
    fn value(&self, path: &SKPath) -> Option<&SKValue>;
    /// `table[row][col]`, 1-indexed.
    fn cell(&self, _table: &SKPath, _row: i64, _col: i64) -> Option<i64> {
        None
    }
    fn define(&self, _path: &SKPath) -> Option<&Predicate> {
        None
    }
}

/// A 1-indexed integer table.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub cells: Vec<Vec<i64>>,
}

impl Table {
    pub fn new(cells: Vec<Vec<i64>>) -> Table {
        Table { cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn get(&self, row: i64, col: i64) -> Option<i64> {
        if row < 1 || col < 1 {
            return None;
        }
        self.cells
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize - 1))
            .copied()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct SKState {
    values: FxHashMap<SKPath, SKValue>,
}

impl SKState {
    pub fn new() -> SKState {
        SKState::default()
    }

    pub fn add_variable(&mut self, path: SKPath, value: SKValue) {
        self.values.insert(path, value);
    }

    pub fn sk_value_from_path(&self, path: &SKPath) -> Option<&SKValue> {
        self.values.get(path)
    }

    pub fn int_from_path(&self, path: &SKPath) -> Option<i64> {
        self.values.get(path).and_then(|v| v.as_int())
    }

    /// The values of `paths`, in order. Missing entries are skipped.
    pub fn projection(&self, paths: &[SKPath]) -> Vec<SKValue> {
        paths
            .iter()
            .flat_map(|p| self.values.get(p).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Valuation for SKState {
    fn value(&self, path: &SKPath) -> Option<&SKValue> {
        self.values.get(path)
    }
}

impl fmt::Display for SKState {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.values.iter().collect();
        entries.sort();
        let s: Vec<String> = entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(fmtr, "{}", s.join("\n"))
    }
}

/// A state together with the fixed parts of a model: tables and derived
/// predicates.
pub struct Frame<'a> {
    pub state: &'a SKState,
    pub tables: &'a FxHashMap<SKPath, Table>,
    pub defines: &'a FxHashMap<SKPath, Predicate>,
}

impl<'a> Valuation for Frame<'a> {
    fn value(&self, path: &SKPath) -> Option<&SKValue> {
        self.state.sk_value_from_path(path)
    }

    fn cell(&self, table: &SKPath, row: i64, col: i64) -> Option<i64> {
        self.tables.get(table).and_then(|t| t.get(row, col))
    }

    fn define(&self, path: &SKPath) -> Option<&Predicate> {
        self.defines.get(path)
    }
}

#[macro_export]
macro_rules! state {
    ($( $key: expr => $val: expr ),* $(,)?) => {{
        let mut s = $crate::SKState::new();
        $( s.add_variable($crate::SKPath::from($key), $crate::ToSKValue::to_skvalue(&$val)); )*
        s
    }}
}
