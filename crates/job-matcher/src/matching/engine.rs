use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constraint::CheckResult;
use super::facts::Facts;
use super::position::{run_checks, Position, PositionResult};
use super::trace::{CheckPool, Trace, TraceEntry};

/// Results of one evaluation call together with the trace that explains them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedEvaluation {
    pub results: Vec<PositionResult>,
    pub trace: Trace,
}

/// Evaluate every position in order, returning the trace by value.
pub fn evaluate_traced(facts: &Facts, positions: &[Position]) -> TracedEvaluation {
    let mut trace = Trace::new();
    let mut results = Vec::with_capacity(positions.len());

    for position in positions {
        trace.push(TraceEntry::Position {
            name: position.name.clone(),
        });

        let required = run_checks(facts, &position.required);
        let desired = run_checks(facts, &position.desired);
        record_checks(&mut trace, &position.name, CheckPool::Required, &required);
        record_checks(&mut trace, &position.name, CheckPool::Desired, &desired);

        let result = PositionResult::from_checks(&position.name, required, desired);
        trace.push(TraceEntry::Verdict {
            position: result.name.clone(),
            qualified: result.qualified,
            missing_required: result.missing_required(),
        });

        debug!(
            position = %result.name,
            qualified = result.qualified,
            required_match_pct = result.required_match_pct,
            desired_match_pct = result.desired_match_pct,
            "position evaluated"
        );
        results.push(result);
    }

    TracedEvaluation { results, trace }
}

fn record_checks(
    trace: &mut Trace,
    position: &str,
    pool: CheckPool,
    checks: &[CheckResult],
) {
    for check in checks {
        trace.push(TraceEntry::Check {
            position: position.to_string(),
            pool,
            check: check.clone(),
        });
    }
}

/// Engine facade that keeps the trace of its most recent evaluation.
///
/// Each call to [`InferenceEngine::evaluate_with_trace`] replaces the previous trace.
#[derive(Debug, Default)]
pub struct InferenceEngine {
    trace: Trace,
}

impl InferenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate_with_trace(
        &mut self,
        facts: &Facts,
        positions: &[Position],
    ) -> Vec<PositionResult> {
        let TracedEvaluation { results, trace } = evaluate_traced(facts, positions);
        self.trace = trace;
        results
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Hand the trace to the caller, leaving an empty one behind.
    pub fn take_trace(&mut self) -> Trace {
        std::mem::take(&mut self.trace)
    }
}
