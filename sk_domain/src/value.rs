//! Values that model variables can take: bounded integers and enum symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SKValue {
    Int(i64),
    Symbol(String),
}

impl SKValue {
    pub fn symbol(s: &str) -> SKValue {
        SKValue::Symbol(s.to_string())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SKValue::Int(i) => Some(*i),
            SKValue::Symbol(_) => None,
        }
    }
}

impl Default for SKValue {
    fn default() -> Self {
        SKValue::Int(0)
    }
}

impl fmt::Display for SKValue {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SKValue::Int(i) => write!(fmtr, "{i}"),
            SKValue::Symbol(s) => write!(fmtr, "{s}"),
        }
    }
}

pub trait ToSKValue {
    fn to_skvalue(&self) -> SKValue;
}

impl ToSKValue for i64 {
    fn to_skvalue(&self) -> SKValue {
        SKValue::Int(*self)
    }
}

impl ToSKValue for i32 {
    fn to_skvalue(&self) -> SKValue {
        SKValue::Int(*self as i64)
    }
}

impl ToSKValue for usize {
    fn to_skvalue(&self) -> SKValue {
        SKValue::Int(*self as i64)
    }
}

impl ToSKValue for bool {
    fn to_skvalue(&self) -> SKValue {
        SKValue::Int(if *self { 1 } else { 0 })
    }
}

impl ToSKValue for SKValue {
    fn to_skvalue(&self) -> SKValue {
        self.clone()
    }
}
