//! Level files and reports for the `sokoban-check` binary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sk_domain::*;
use sk_formal::*;
use std::fmt::Write;
use std::path::Path;
use std::time::Duration;

/// Boards are blocks of lines separated by blank lines. Lines starting with
/// `;` are comments. Ragged rows are padded with floor.
pub fn read_boards(text: &str) -> SKResult<Vec<Board>> {
    let mut boards = vec![];
    let mut rows: Vec<&str> = vec![];
    for line in text.lines() {
        let line = line.trim_end();
        if line.trim_start().starts_with(';') {
            continue;
        }
        if line.trim().is_empty() {
            if !rows.is_empty() {
                boards.push(Board::padded(&rows)?);
                rows.clear();
            }
            continue;
        }
        rows.push(line);
    }
    if !rows.is_empty() {
        boards.push(Board::padded(&rows)?);
    }
    Ok(boards)
}

pub fn load_boards(path: &Path) -> SKResult<Vec<Board>> {
    let text = std::fs::read_to_string(path)?;
    read_boards(&text)
}

/// Everything one `check` run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub config: CheckConfig,
    pub batch: BatchReport,
}

fn secs(d: Duration) -> String {
    format!("{:.2}", d.as_secs_f64())
}

fn figure(x: Option<f64>) -> String {
    x.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".into())
}

/// A Markdown table with one row per engine run, and one per failed board.
pub fn summary_table(report: &BatchReport) -> String {
    let mut s = String::new();
    s.push_str("| Board | Engine | Bound | Verdict | Time (s) | CPU (s) | Mem (MB) |\n");
    s.push_str("|:-----:|:------:|:-----:|:--------|:--------:|:-------:|:--------:|\n");
    for outcome in &report.outcomes {
        match outcome {
            BoardOutcome::Checked { board, results, .. } => {
                for r in results {
                    let _ = writeln!(
                        s,
                        "| {} | {} | {} | {} | {} | {} | {} |",
                        board,
                        r.strategy.engine_tag().to_uppercase(),
                        r.bound,
                        r.verdict,
                        secs(r.elapsed),
                        figure(r.cpu_seconds),
                        figure(r.memory_mb)
                    );
                }
            }
            BoardOutcome::Failed { board, error } => {
                let _ = writeln!(s, "| {board} | - | - | failed: {error} | - | - | - |");
            }
        }
    }
    s
}

/// Per-box verdicts of one board, with the caveat that goes with them.
pub fn iterative_summary(report: &IterativeReport) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "Board {}, one box at a time (boxes may still block each other):",
        report.board
    );
    for b in &report.boxes {
        let _ = writeln!(
            s,
            " Box {}: {} in {}s",
            b.id,
            b.result.verdict,
            secs(b.result.elapsed)
        );
    }
    let _ = writeln!(s, " Total time: {}s", secs(report.total));
    s
}
