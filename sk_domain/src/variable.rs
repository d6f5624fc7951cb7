use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum Domain {
    /// Integers `lo..hi`, both ends included.
    Range(i64, i64),
    Enum(Vec<String>),
    /// A `rows` x `cols` table, 1-indexed, of integers in `lo..hi`.
    Table {
        rows: usize,
        cols: usize,
        lo: i64,
        hi: i64,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub path: SKPath,
    pub domain: Domain,
}

impl Variable {
    pub fn new(name: &str, domain: Domain) -> Variable {
        Variable {
            path: SKPath::from_string(name),
            domain,
        }
    }

    pub fn new_range(name: &str, lo: i64, hi: i64) -> Variable {
        Variable::new(name, Domain::Range(lo, hi))
    }

    pub fn new_enum(name: &str, symbols: &[&str]) -> Variable {
        Variable::new(
            name,
            Domain::Enum(symbols.iter().map(|s| s.to_string()).collect()),
        )
    }

    pub fn new_table(name: &str, rows: usize, cols: usize, lo: i64, hi: i64) -> Variable {
        Variable::new(name, Domain::Table { rows, cols, lo, hi })
    }

    pub fn path(&self) -> &SKPath {
        &self.path
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn is_table(&self) -> bool {
        matches!(self.domain, Domain::Table { .. })
    }

    /// Whether a scalar value lies in the domain. Tables hold no scalar value.
    pub fn contains(&self, value: &SKValue) -> bool {
        match (&self.domain, value) {
            (Domain::Range(lo, hi), SKValue::Int(i)) => lo <= i && i <= hi,
            (Domain::Enum(xs), SKValue::Symbol(s)) => xs.contains(s),
            _ => false,
        }
    }

    /// Every value of a scalar domain, in declaration order.
    pub fn values(&self) -> Vec<SKValue> {
        match &self.domain {
            Domain::Range(lo, hi) => (*lo..=*hi).map(SKValue::Int).collect(),
            Domain::Enum(xs) => xs.iter().map(|s| SKValue::Symbol(s.clone())).collect(),
            Domain::Table { .. } => vec![],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Range(lo, hi) => write!(fmtr, "{lo}..{hi}"),
            Domain::Enum(xs) => write!(fmtr, "{{{}}}", xs.join(", ")),
            Domain::Table { rows, cols, lo, hi } => {
                write!(fmtr, "array 1..{rows} of array 1..{cols} of {lo}..{hi}")
            }
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "{} : {}", self.path, self.domain)
    }
}

#[cfg(test)]
mod test_variable {
    use super::*;

    #[test]
    fn declarations_print_as_engine_input() {
        assert_eq!(Variable::new_range("man_c", 1, 5).to_string(), "man_c : 1..5");
        assert_eq!(
            Variable::new_enum("move", &["l", "u", "r", "d"]).to_string(),
            "move : {l, u, r, d}"
        );
        assert_eq!(
            Variable::new_table("walls", 3, 5, 0, 1).to_string(),
            "walls : array 1..3 of array 1..5 of 0..1"
        );
    }

    #[test]
    fn domains() {
        let v = Variable::new_range("man_r", 1, 3);
        assert!(v.contains(&SKValue::Int(3)));
        assert!(!v.contains(&SKValue::Int(0)));
        assert!(!v.contains(&SKValue::symbol("r")));
        assert_eq!(v.values().len(), 3);

        let m = Variable::new_enum("move", &["l", "u", "r", "d"]);
        assert!(m.contains(&SKValue::symbol("d")));
        assert_eq!(m.values()[2], SKValue::symbol("r"));

        let t = Variable::new_table("walls", 2, 2, 0, 1);
        assert!(t.is_table());
        assert!(t.values().is_empty());
    }
}
