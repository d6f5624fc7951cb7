use crate::Strategy;
use serde::{Deserialize, Serialize};
use sk_domain::*;
use sk_model::*;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// One engine run: a model, how to search it and how deep. The model is
/// shared between the tasks of a board.
#[derive(Debug, Clone)]
pub struct VerificationTask {
    /// Also the artifact name, without extension.
    pub name: String,
    pub model: Arc<CompiledModel>,
    pub strategy: Strategy,
    pub bound: u32,
}

impl VerificationTask {
    pub fn new(name: &str, model: Arc<CompiledModel>, strategy: Strategy, bound: u32) -> Self {
        VerificationTask {
            name: name.to_string(),
            model,
            strategy,
            bound,
        }
    }

    pub fn artifact_file_name(&self) -> String {
        format!("{}.smv", self.name)
    }
}

/// Why a run produced no verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inconclusive {
    EngineUnavailable(String),
    Timeout(Duration),
    /// The engine printed an error, usually about the model.
    EngineReported(String),
    /// None of the known answers appeared in the output.
    UnrecognizedOutput,
    Failed(String),
}

impl From<SKError> for Inconclusive {
    fn from(e: SKError) -> Self {
        match e {
            SKError::EngineUnavailable(s) => Inconclusive::EngineUnavailable(s),
            SKError::Timeout(d) => Inconclusive::Timeout(d),
            e => Inconclusive::Failed(e.to_string()),
        }
    }
}

impl fmt::Display for Inconclusive {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconclusive::EngineUnavailable(s) => write!(fmtr, "engine unavailable ({s})"),
            Inconclusive::Timeout(d) => write!(fmtr, "timed out after {}s", d.as_secs()),
            Inconclusive::EngineReported(s) => write!(fmtr, "engine error ({s})"),
            Inconclusive::UnrecognizedOutput => write!(fmtr, "unrecognized output"),
            Inconclusive::Failed(s) => write!(fmtr, "failed ({s})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The engine found a path to a win within the bound.
    SolvableWithinBound,
    /// No path to a win within the bound. Says nothing about longer paths.
    NotFoundWithinBound,
    Inconclusive(Inconclusive),
}

impl Verdict {
    pub fn is_solvable(&self) -> bool {
        matches!(self, Verdict::SolvableWithinBound)
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Verdict::Inconclusive(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::SolvableWithinBound => write!(fmtr, "solvable"),
            Verdict::NotFoundWithinBound => write!(fmtr, "not found"),
            Verdict::Inconclusive(r) => write!(fmtr, "inconclusive: {r}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub task: String,
    pub strategy: Strategy,
    pub bound: u32,
    pub target: WinTarget,
    pub verdict: Verdict,
    pub elapsed: Duration,
    pub cpu_seconds: Option<f64>,
    pub memory_mb: Option<f64>,
    pub stdout: String,
    pub stderr: String,
}

impl VerificationResult {
    /// A run that ended without engine output.
    pub fn failed(task: &VerificationTask, reason: Inconclusive, elapsed: Duration) -> Self {
        VerificationResult {
            task: task.name.clone(),
            strategy: task.strategy,
            bound: task.bound,
            target: task.model.target,
            verdict: Verdict::Inconclusive(reason),
            elapsed,
            cpu_seconds: None,
            memory_mb: None,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}
