//! Reads verdicts and resource figures out of the engine's text output.
//!
//! The engine is asked to refute "never eventually win", so the property
//! being false is the good news.

use crate::*;
use regex::Regex;
use std::sync::OnceLock;

const REFUTED: &str = "is false";
const PROVED: &str = "is true";
const BOUND_EXHAUSTED: &str = "no counterexample found with bound";

pub fn interpret(stdout: &str, stderr: &str) -> Verdict {
    let out = stdout.to_lowercase();
    if out.contains(REFUTED) {
        Verdict::SolvableWithinBound
    } else if out.contains(PROVED) || out.contains(BOUND_EXHAUSTED) {
        Verdict::NotFoundWithinBound
    } else if let Some(line) = error_line(stdout, stderr) {
        Verdict::Inconclusive(Inconclusive::EngineReported(line))
    } else {
        Verdict::Inconclusive(Inconclusive::UnrecognizedOutput)
    }
}

fn error_line(stdout: &str, stderr: &str) -> Option<String> {
    stderr
        .lines()
        .chain(stdout.lines())
        .find(|l| l.to_lowercase().contains("error"))
        .map(|l| l.trim().to_string())
}

fn cpu_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)cpu time.*?([0-9]+\.[0-9]+)").ok())
        .as_ref()
}

fn memory_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)memory used.*?([0-9]+\.[0-9]+)\s*mb").ok())
        .as_ref()
}

fn first_number(re: Option<&Regex>, text: &str) -> Option<f64> {
    re?.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn extract_cpu_seconds(stdout: &str) -> Option<f64> {
    first_number(cpu_re(), stdout)
}

pub fn extract_memory_mb(stdout: &str) -> Option<f64> {
    first_number(memory_re(), stdout)
}
