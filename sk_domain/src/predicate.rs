/// This file defines both predicates and actions

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean expressions over model variables. `DEF` refers to a derived
/// predicate by name, resolved through the valuation.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub enum Predicate {
    AND(Vec<Predicate>),
    OR(Vec<Predicate>),
    NOT(Box<Predicate>),
    TRUE,
    FALSE,
    EQ(PredicateValue, PredicateValue),
    NEQ(PredicateValue, PredicateValue),
    LT(PredicateValue, PredicateValue),
    GT(PredicateValue, PredicateValue),
    DEF(SKPath),
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub enum PredicateValue {
    SKValue(SKValue),
    SKPath(SKPath),
    /// `path + k`, or `path - k` for negative k.
    Offset(SKPath, i64),
    /// `table[row][col]`
    Cell(SKPath, Box<PredicateValue>, Box<PredicateValue>),
}

/// An assignment to a variable. Where the action is stored decides whether it
/// is an initial value, a constant assignment or a next-state relation.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct Action {
    pub var: SKPath,
    pub value: Compute,
}

/// Used in actions to compute a new SKValue.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub enum Compute {
    PredicateValue(PredicateValue),
    /// Guarded alternatives, the first guard that holds wins.
    Function(Vec<(Predicate, PredicateValue)>),
}

pub trait ToPredicateValue {
    fn to_predicate_value(&self) -> PredicateValue;
}

// Just a macro helper...
pub trait ToPredicate {
    fn to_predicate(&self) -> Predicate;
}

impl ToPredicate for Predicate {
    fn to_predicate(&self) -> Predicate {
        self.clone()
    }
}

impl ToPredicate for SKPath {
    fn to_predicate(&self) -> Predicate {
        Predicate::DEF(self.clone())
    }
}

impl ToPredicateValue for PredicateValue {
    fn to_predicate_value(&self) -> PredicateValue {
        self.clone()
    }
}

impl ToPredicateValue for SKPath {
    fn to_predicate_value(&self) -> PredicateValue {
        PredicateValue::SKPath(self.clone())
    }
}

impl ToPredicateValue for SKValue {
    fn to_predicate_value(&self) -> PredicateValue {
        PredicateValue::SKValue(self.clone())
    }
}

impl ToPredicateValue for i64 {
    fn to_predicate_value(&self) -> PredicateValue {
        PredicateValue::SKValue(self.to_skvalue())
    }
}

impl ToPredicateValue for i32 {
    fn to_predicate_value(&self) -> PredicateValue {
        PredicateValue::SKValue(self.to_skvalue())
    }
}

impl ToPredicateValue for usize {
    fn to_predicate_value(&self) -> PredicateValue {
        PredicateValue::SKValue(self.to_skvalue())
    }
}

impl PredicateValue {
    pub fn value(v: SKValue) -> Self {
        PredicateValue::SKValue(v)
    }

    pub fn path(p: SKPath) -> Self {
        PredicateValue::SKPath(p)
    }

    pub fn offset(p: SKPath, k: i64) -> Self {
        if k == 0 {
            PredicateValue::SKPath(p)
        } else {
            PredicateValue::Offset(p, k)
        }
    }

    pub fn cell(table: SKPath, row: PredicateValue, col: PredicateValue) -> Self {
        PredicateValue::Cell(table, Box::new(row), Box::new(col))
    }

    pub fn sk_value(&self, v: &dyn Valuation) -> SKResult<SKValue> {
        match self {
            PredicateValue::SKValue(x) => Ok(x.clone()),
            PredicateValue::SKPath(p) => v
                .value(p)
                .cloned()
                .ok_or_else(|| SKError::invariant(format!("no value for variable {p}"))),
            PredicateValue::Offset(p, k) => {
                let base = PredicateValue::SKPath(p.clone()).int_value(v)?;
                Ok(SKValue::Int(base + k))
            }
            PredicateValue::Cell(t, row, col) => {
                let r = row.int_value(v)?;
                let c = col.int_value(v)?;
                v.cell(t, r, c).map(SKValue::Int).ok_or_else(|| {
                    SKError::invariant(format!("{t}[{r}][{c}] is outside the table"))
                })
            }
        }
    }

    pub fn int_value(&self, v: &dyn Valuation) -> SKResult<i64> {
        match self.sk_value(v)? {
            SKValue::Int(i) => Ok(i),
            SKValue::Symbol(s) => Err(SKError::invariant(format!(
                "{self} evaluated to the symbol {s}, expected an integer"
            ))),
        }
    }

    fn support(&self, s: &mut Vec<SKPath>) {
        match self {
            PredicateValue::SKValue(_) => {}
            PredicateValue::SKPath(p) | PredicateValue::Offset(p, _) => s.push(p.clone()),
            PredicateValue::Cell(t, row, col) => {
                s.push(t.clone());
                row.support(s);
                col.support(s);
            }
        }
    }
}

impl fmt::Display for PredicateValue {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateValue::SKValue(v) => write!(fmtr, "{v}"),
            PredicateValue::SKPath(p) => write!(fmtr, "{p}"),
            PredicateValue::Offset(p, k) if *k < 0 => write!(fmtr, "{p} - {}", -k),
            PredicateValue::Offset(p, k) => write!(fmtr, "{p} + {k}"),
            PredicateValue::Cell(t, row, col) => write!(fmtr, "{t}[{row}][{col}]"),
        }
    }
}

/// Operands of `&`, `|` and `!` are parenthesized unless they are atoms.
fn operand(p: &Predicate) -> String {
    match p {
        Predicate::TRUE | Predicate::FALSE | Predicate::DEF(_) | Predicate::NOT(_) => {
            format!("{p}")
        }
        _ => format!("({p})"),
    }
}

/// Predicates print in the input syntax of the verification engine.
impl fmt::Display for Predicate {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = match &self {
            Predicate::AND(x) if x.is_empty() => "TRUE".into(),
            Predicate::AND(x) => {
                let children: Vec<_> = x.iter().map(operand).collect();
                children.join(" & ")
            }
            Predicate::OR(x) if x.is_empty() => "FALSE".into(),
            Predicate::OR(x) => {
                let children: Vec<_> = x.iter().map(operand).collect();
                children.join(" | ")
            }
            Predicate::NOT(p) => format!("!{}", operand(p)),
            Predicate::TRUE => "TRUE".into(),
            Predicate::FALSE => "FALSE".into(),
            Predicate::EQ(x, y) => format!("{x} = {y}"),
            Predicate::NEQ(x, y) => format!("{x} != {y}"),
            Predicate::LT(x, y) => format!("{x} < {y}"),
            Predicate::GT(x, y) => format!("{x} > {y}"),
            Predicate::DEF(p) => format!("{p}"),
        };

        write!(fmtr, "{}", &s)
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::TRUE
    }
}

impl Predicate {
    /// Return the supporting names of this expression: variables, tables and
    /// derived predicates.
    pub fn support(&self) -> Vec<SKPath> {
        let mut s = Vec::new();
        self.collect_support(&mut s);
        s.sort();
        s.dedup();
        s
    }

    fn collect_support(&self, s: &mut Vec<SKPath>) {
        match &self {
            Predicate::AND(x) | Predicate::OR(x) => {
                x.iter().for_each(|p| p.collect_support(s));
            }
            Predicate::NOT(x) => x.collect_support(s),
            Predicate::TRUE | Predicate::FALSE => {}
            Predicate::EQ(x, y)
            | Predicate::NEQ(x, y)
            | Predicate::LT(x, y)
            | Predicate::GT(x, y) => {
                x.support(s);
                y.support(s);
            }
            Predicate::DEF(p) => s.push(p.clone()),
        }
    }
}

impl Action {
    pub fn new(var: SKPath, value: Compute) -> Self {
        Action { var, value }
    }

    pub fn assign(var: SKPath, value: PredicateValue) -> Self {
        Action::new(var, Compute::PredicateValue(value))
    }

    /// Names read by this action, guards included.
    pub fn support(&self) -> Vec<SKPath> {
        let mut s = Vec::new();
        match &self.value {
            Compute::PredicateValue(v) => v.support(&mut s),
            Compute::Function(xs) => {
                for (guard, v) in xs {
                    s.extend(guard.support());
                    v.support(&mut s);
                }
            }
        }
        s.sort();
        s.dedup();
        s
    }

    /// The value this action assigns in the given valuation.
    pub fn next(&self, v: &dyn Valuation) -> SKResult<SKValue> {
        match &self.value {
            Compute::PredicateValue(pv) => pv.sk_value(v),
            Compute::Function(xs) => {
                for (guard, pv) in xs {
                    if guard.eval(v)? {
                        return pv.sk_value(v);
                    }
                }
                Err(SKError::invariant(format!(
                    "No predicates in the action Function for {} was true",
                    self.var
                )))
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Compute::PredicateValue(v) => write!(fmtr, "{} := {}", self.var, v),
            Compute::Function(xs) => {
                let cases = xs.iter().fold(String::default(), |acc, (p, v)| {
                    format!("{acc}[if {p} then {v}]")
                });
                write!(fmtr, "{} := {}", self.var, cases)
            }
        }
    }
}

/// Eval is used to evaluate a predicate against a valuation.
pub trait EvaluatePredicate {
    fn eval(&self, v: &dyn Valuation) -> SKResult<bool>;
}

fn compare(
    lp: &PredicateValue,
    rp: &PredicateValue,
    v: &dyn Valuation,
) -> SKResult<(SKValue, SKValue)> {
    let a = lp.sk_value(v)?;
    let b = rp.sk_value(v)?;
    match (&a, &b) {
        (SKValue::Int(_), SKValue::Int(_)) | (SKValue::Symbol(_), SKValue::Symbol(_)) => Ok((a, b)),
        _ => Err(SKError::invariant(format!(
            "comparing {lp} and {rp} mixes integers and symbols"
        ))),
    }
}

impl EvaluatePredicate for Predicate {
    fn eval(&self, v: &dyn Valuation) -> SKResult<bool> {
        match self {
            // short-circuit: guards put bounds checks before table lookups
            Predicate::AND(ps) => {
                for p in ps {
                    if !p.eval(v)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::OR(ps) => {
                for p in ps {
                    if p.eval(v)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::NOT(p) => Ok(!p.eval(v)?),
            Predicate::TRUE => Ok(true),
            Predicate::FALSE => Ok(false),
            Predicate::EQ(lp, rp) => compare(lp, rp, v).map(|(a, b)| a == b),
            Predicate::NEQ(lp, rp) => compare(lp, rp, v).map(|(a, b)| a != b),
            Predicate::LT(lp, rp) => Ok(lp.int_value(v)? < rp.int_value(v)?),
            Predicate::GT(lp, rp) => Ok(lp.int_value(v)? > rp.int_value(v)?),
            Predicate::DEF(p) => match v.define(p) {
                Some(def) => def.eval(v),
                None => Err(SKError::invariant(format!("no derived predicate named {p}"))),
            },
        }
    }
}

#[macro_export]
macro_rules! p {
    // parens
    (($($inner:tt)+) ) => {{
        $crate::p! ( $($inner)+ )
    }};
    ([$($inner:tt)+] ) => {{
        $crate::p! ( $($inner)+ )
    }};

    // AND: the brackets are needed because "tt" includes && which
    // leads to ambiguity without an additional delimeter
    ([$($first:tt)+] $(&& [$($rest:tt)+])+) => {{
        let first = $crate::p! ( $($first)+ );
        let mut v = vec![first];
        $(
            let r = $crate::p!($($rest)+);
            v.push(r);
        )*
        $crate::Predicate::AND(v)
    }};

    // OR: same as and.
    ([$($first:tt)+] $(|| [$($rest:tt)+])+) => {{
        let first = $crate::p! ( $($first)+ );
        let mut v = vec![first];
        $(
            let r = $crate::p!($($rest)+);
            v.push(r);
        )*
        $crate::Predicate::OR(v)
    }};

    // implication
    ([$($x:tt)+] => [$($y:tt)+]) => {{
        let x = $crate::p! ( $($x)+ );
        let y = $crate::p! ( $($y)+ );
        $crate::Predicate::OR(vec![$crate::Predicate::NOT(Box::new(x)), y])
    }};

    ([ $lhs:expr ] == [ $rhs:expr ]) => {{
        $crate::Predicate::EQ(
            $crate::ToPredicateValue::to_predicate_value(&$lhs),
            $crate::ToPredicateValue::to_predicate_value(&$rhs),
        )
    }};

    ([ $lhs:expr ] != [ $rhs:expr ]) => {{
        $crate::Predicate::NEQ(
            $crate::ToPredicateValue::to_predicate_value(&$lhs),
            $crate::ToPredicateValue::to_predicate_value(&$rhs),
        )
    }};

    ([ $lhs:expr ] < [ $rhs:expr ]) => {{
        $crate::Predicate::LT(
            $crate::ToPredicateValue::to_predicate_value(&$lhs),
            $crate::ToPredicateValue::to_predicate_value(&$rhs),
        )
    }};

    ([ $lhs:expr ] > [ $rhs:expr ]) => {{
        $crate::Predicate::GT(
            $crate::ToPredicateValue::to_predicate_value(&$lhs),
            $crate::ToPredicateValue::to_predicate_value(&$rhs),
        )
    }};

    // negation
    (! $($inner:tt)+ ) => {{
        let inner = $crate::p! ( $($inner)+ );
        $crate::Predicate::NOT(Box::new( inner ))
    }};

    ($i:expr) => {{
        $crate::ToPredicate::to_predicate(&$i)
    }};
}

/// ********** TESTS ***************
