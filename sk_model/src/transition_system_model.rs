/// This module contains the model type the compiler produces and the
/// serializer prints. It holds meaning only, no text.
use crate::naming;
use serde::{Deserialize, Serialize};
use sk_domain::*;
use std::collections::BTreeSet;
use std::fmt;

/// What the win predicate asks for.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
pub enum WinTarget {
    /// Every box sits on some goal.
    AllBoxes,
    /// The designated box sits on some goal. Used by the per-box decomposition.
    SingleBox(BoxId),
}

impl Default for WinTarget {
    fn default() -> Self {
        WinTarget::AllBoxes
    }
}

impl fmt::Display for WinTarget {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinTarget::AllBoxes => write!(fmtr, "all boxes"),
            WinTarget::SingleBox(id) => write!(fmtr, "box {id}"),
        }
    }
}

/// The temporal property handed to the engine. The engine is asked to refute
/// it, a counterexample is a reachable win.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub enum TemporalProperty {
    NeverEventually(SKPath),
}

impl fmt::Display for TemporalProperty {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalProperty::NeverEventually(p) => write!(fmtr, "!(F {p})"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct CompiledModel {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub target: WinTarget,
    pub boxes: Vec<BoxId>,
    pub goals: Vec<GoalId>,
    pub vars: Vec<Variable>,
    /// `init(var) := value`
    pub init: Vec<Action>,
    /// `var := value`, for variables that never change.
    pub constants: Vec<Action>,
    /// Fixed tables, assigned cell by cell.
    pub tables: Vec<(SKPath, Table)>,
    /// `next(var) := case ... esac`, one per mutable variable.
    pub transitions: Vec<Action>,
    pub state_predicates: Vec<NamedPredicate>,
    pub property: TemporalProperty,
}

impl CompiledModel {
    pub fn var(&self, path: &SKPath) -> Option<&Variable> {
        self.vars.iter().find(|v| &v.path == path)
    }

    pub fn state_predicate(&self, path: &SKPath) -> Option<&NamedPredicate> {
        self.state_predicates.iter().find(|p| &p.path == path)
    }

    pub fn table(&self, path: &SKPath) -> Option<&Table> {
        self.tables.iter().find(|(p, _)| p == path).map(|(_, t)| t)
    }

    /// The predicate the property is about.
    pub fn win(&self) -> Option<&NamedPredicate> {
        match &self.property {
            TemporalProperty::NeverEventually(p) => self.state_predicate(p),
        }
    }

    /// Checks that every name read anywhere in the model is declared, that
    /// every declared name is unique and that every box and goal index used
    /// in a name is in range. A failure here is a compiler bug.
    pub fn validate(&self) -> SKResult<()> {
        let mut declared = BTreeSet::new();
        for name in self
            .vars
            .iter()
            .map(|v| &v.path)
            .chain(self.state_predicates.iter().map(|p| &p.path))
        {
            if !declared.insert(name.clone()) {
                return Err(SKError::invariant(format!("{name} is declared twice")));
            }
            self.check_indices(name)?;
        }

        for (p, t) in &self.tables {
            match self.var(p).map(|v| &v.domain) {
                Some(Domain::Table { rows, cols, .. }) if *rows == t.rows() && *cols == t.cols() => {}
                _ => {
                    return Err(SKError::invariant(format!(
                        "table {p} does not match its declaration"
                    )))
                }
            }
        }

        let mut used: Vec<SKPath> = vec![];
        for a in self.init.iter().chain(&self.constants).chain(&self.transitions) {
            used.push(a.var.clone());
            used.extend(a.support());
        }
        for p in &self.state_predicates {
            used.extend(p.predicate.support());
        }
        match &self.property {
            TemporalProperty::NeverEventually(p) => used.push(p.clone()),
        }

        for name in &used {
            if !declared.contains(name) {
                return Err(SKError::invariant(format!("{name} is used but never declared")));
            }
            self.check_indices(name)?;
        }

        if let WinTarget::SingleBox(id) = self.target {
            if !self.boxes.contains(&id) {
                return Err(SKError::invariant(format!("target box {id} does not exist")));
            }
        }

        Ok(())
    }

    fn check_indices(&self, name: &SKPath) -> SKResult<()> {
        let s = name.as_str();
        let index = |prefix: &str| -> Option<usize> {
            s.strip_prefix(prefix)
                .and_then(|rest| rest.split('_').next())
                .and_then(|n| n.parse().ok())
        };
        if let Some(i) = index("box_") {
            if !self.boxes.contains(&BoxId(i)) {
                return Err(SKError::invariant(format!("{name} refers to box {i}")));
            }
        }
        if let Some(j) = index("goal_") {
            if !self.goals.contains(&GoalId(j)) {
                return Err(SKError::invariant(format!("{name} refers to goal {j}")));
            }
        }
        Ok(())
    }

    /// Variables with a next-state relation, in declaration order.
    pub fn mutable_vars(&self) -> Vec<SKPath> {
        self.transitions.iter().map(|a| a.var.clone()).collect()
    }

    pub fn move_var(&self) -> Option<&Variable> {
        self.var(&naming::move_var())
    }
}
