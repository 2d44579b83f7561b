use std::fmt;

use serde::{Deserialize, Serialize};

use super::constraint::CheckResult;
use super::facts::describe_actual;

/// Which pool of a position a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckPool {
    Required,
    Desired,
}

impl CheckPool {
    pub const fn label(self) -> &'static str {
        match self {
            CheckPool::Required => "required",
            CheckPool::Desired => "desired",
        }
    }
}

/// Structured trace record; rendered to text only at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEntry {
    Position {
        name: String,
    },
    Check {
        position: String,
        pool: CheckPool,
        check: CheckResult,
    },
    Verdict {
        position: String,
        qualified: bool,
        missing_required: usize,
    },
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::Position { name } => write!(f, "=== Evaluating position: {name} ==="),
            TraceEntry::Check { pool, check, .. } => write!(
                f,
                "  [{}] {}: {} (field: {}, operator: {}, expected: {}, actual: {})",
                if check.passed { "PASS" } else { "FAIL" },
                pool.label(),
                check.message,
                check.field,
                check.operator,
                check.expected,
                describe_actual(check.actual.as_ref()),
            ),
            TraceEntry::Verdict {
                position,
                qualified: true,
                ..
            } => write!(f, "  => QUALIFIED for {position}"),
            TraceEntry::Verdict {
                position,
                qualified: false,
                missing_required,
            } => write!(
                f,
                "  => NOT QUALIFIED for {position} ({missing_required} required check(s) missing)"
            ),
        }
    }
}

/// Ordered log of every check performed during one evaluation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Human-readable rendering, one line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Checks recorded for a single position, in evaluation order.
    pub fn checks_for<'a>(&'a self, position: &'a str) -> impl Iterator<Item = &'a CheckResult> {
        self.entries.iter().filter_map(move |entry| match entry {
            TraceEntry::Check {
                position: name,
                check,
                ..
            } if name == position => Some(check),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
