use crate::*;
use serde::{Deserialize, Serialize};
use sk_domain::*;
use sk_model::*;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoardOutcome {
    Checked {
        board: usize,
        results: Vec<VerificationResult>,
        iterative: Option<IterativeReport>,
    },
    /// The board could not be compiled or its model not written.
    Failed { board: usize, error: String },
}

impl BoardOutcome {
    pub fn board(&self) -> usize {
        match self {
            BoardOutcome::Checked { board, .. } | BoardOutcome::Failed { board, .. } => *board,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<BoardOutcome>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, BoardOutcome::Failed { .. }))
            .count()
    }
}

/// Numbers boards from 1, in file order.
pub fn numbered(boards: Vec<Board>) -> Vec<(usize, Board)> {
    boards.into_iter().enumerate().map(|(i, b)| (i + 1, b)).collect()
}

/// Checks the boards in order. The number of a board names its model files.
/// A board that fails is recorded and the batch goes on with the next one.
pub async fn run_batch(
    engine: &NuXmv,
    boards: &[(usize, Board)],
    config: &CheckConfig,
) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, board) in boards {
        let index = *index;
        info!(board = index, rows = board.rows(), cols = board.cols(), "checking board");
        let outcome = match check_board(engine, index, board, config).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(board = index, error = %e, "board failed");
                BoardOutcome::Failed {
                    board: index,
                    error: e.to_string(),
                }
            }
        };
        report.outcomes.push(outcome);
    }
    report
}

/// One model file per board, checked once per configured strategy.
pub async fn check_board(
    engine: &NuXmv,
    index: usize,
    board: &Board,
    config: &CheckConfig,
) -> SKResult<BoardOutcome> {
    let model = Arc::new(compile_board(board, WinTarget::AllBoxes)?);
    let name = format!("sokoban_{index}");
    let tasks: Vec<VerificationTask> = config
        .strategies
        .iter()
        .map(|s| VerificationTask::new(&name, model.clone(), *s, config.bound))
        .collect();
    let first = tasks
        .first()
        .ok_or_else(|| SKError::Config("no strategies configured".into()))?;
    let artifact = engine.prepare(first, &config.output_dir)?;

    let mut results = vec![];
    for task in &tasks {
        results.push(engine.verify_artifact(task, &artifact).await);
    }

    let iterative = if config.iterative {
        Some(
            run_iterative(
                engine,
                index,
                board,
                first.strategy,
                config.bound,
                &config.output_dir,
            )
            .await?,
        )
    } else {
        None
    };

    Ok(BoardOutcome::Checked {
        board: index,
        results,
        iterative,
    })
}
