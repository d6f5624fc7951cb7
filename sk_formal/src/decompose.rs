//! Per-box decomposition.
//!
//! Every box gets its own task asking whether that box alone can reach some
//! goal, from the unchanged starting board. This is an approximation: the
//! paths found for different boxes may block each other, so boxes that are
//! reachable one at a time do not make the whole board solvable.

use crate::*;
use serde::{Deserialize, Serialize};
use sk_domain::*;
use sk_model::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// One task per box, in box order. Task `k` is named `<name>_box<k>`.
pub fn decompose(
    board: &Board,
    entities: &ParsedEntities,
    name: &str,
    strategy: Strategy,
    bound: u32,
) -> SKResult<Vec<(BoxId, VerificationTask)>> {
    entities
        .box_ids()
        .map(|id| -> SKResult<(BoxId, VerificationTask)> {
            let model = compile(board, entities, WinTarget::SingleBox(id))?;
            let task = VerificationTask::new(
                &format!("{name}_box{id}"),
                Arc::new(model),
                strategy,
                bound,
            );
            Ok((id, task))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxOutcome {
    pub id: BoxId,
    pub result: VerificationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterativeReport {
    pub board: usize,
    pub boxes: Vec<BoxOutcome>,
    pub total: Duration,
}

impl IterativeReport {
    /// Every box reached a goal in its own run. Not the same as the board
    /// being solvable, see the module docs. False for a board without boxes.
    pub fn all_boxes_individually_reachable(&self) -> bool {
        !self.boxes.is_empty() && self.boxes.iter().all(|b| b.result.verdict.is_solvable())
    }
}

/// Runs the decomposition of board number `index` one box after the other.
pub async fn run_iterative(
    engine: &NuXmv,
    index: usize,
    board: &Board,
    strategy: Strategy,
    bound: u32,
    dir: &Path,
) -> SKResult<IterativeReport> {
    let entities = parse_board(board)?;
    let tasks = decompose(board, &entities, &format!("sokoban_{index}"), strategy, bound)?;

    let mut boxes = vec![];
    for (id, task) in &tasks {
        let result = engine.verify(task, dir).await;
        info!(board = index, box_id = id.0, verdict = %result.verdict, "box checked");
        boxes.push(BoxOutcome { id: *id, result });
    }
    let total = boxes.iter().map(|b| b.result.elapsed).sum();
    Ok(IterativeReport {
        board: index,
        boxes,
        total,
    })
}
