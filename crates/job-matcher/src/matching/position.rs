use serde::{Deserialize, Serialize};

use super::constraint::{check, CheckResult, Constraint};
use super::facts::Facts;

/// Named job profile bundling required and desired constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub name: String,
    pub required: Vec<Constraint>,
    #[serde(default)]
    pub desired: Vec<Constraint>,
}

impl Position {
    pub fn new(name: impl Into<String>, required: Vec<Constraint>) -> Self {
        Self {
            name: name.into(),
            required,
            desired: Vec::new(),
        }
    }

    pub fn with_desired(mut self, desired: Vec<Constraint>) -> Self {
        self.desired = desired;
        self
    }
}

/// Aggregated outcome for one position.
///
/// `qualified` holds exactly when `required_failed` is empty; desired checks only feed
/// `desired_match_pct` and `total_match_pct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub name: String,
    pub qualified: bool,
    pub required_passed: Vec<CheckResult>,
    pub required_failed: Vec<CheckResult>,
    pub required_match_pct: f64,
    pub desired_met: Vec<CheckResult>,
    pub desired_missing: Vec<CheckResult>,
    pub desired_match_pct: f64,
    pub total_match_pct: f64,
}

impl PositionResult {
    /// Build a result from checks already run in constraint order.
    pub(crate) fn from_checks(
        name: &str,
        required: Vec<CheckResult>,
        desired: Vec<CheckResult>,
    ) -> Self {
        let total_checks = required.len() + desired.len();
        let (required_passed, required_failed): (Vec<_>, Vec<_>) =
            required.into_iter().partition(|check| check.passed);
        let (desired_met, desired_missing): (Vec<_>, Vec<_>) =
            desired.into_iter().partition(|check| check.passed);

        let required_match_pct =
            match_pct(required_passed.len(), required_passed.len() + required_failed.len());
        let desired_match_pct =
            match_pct(desired_met.len(), desired_met.len() + desired_missing.len());
        let total_match_pct = match_pct(required_passed.len() + desired_met.len(), total_checks);

        Self {
            name: name.to_string(),
            qualified: required_failed.is_empty(),
            required_passed,
            required_failed,
            required_match_pct,
            desired_met,
            desired_missing,
            desired_match_pct,
            total_match_pct,
        }
    }

    /// False when the position lists no desired criteria at all, as opposed to none being met.
    pub fn has_desired_criteria(&self) -> bool {
        !self.desired_met.is_empty() || !self.desired_missing.is_empty()
    }

    pub fn missing_required(&self) -> usize {
        self.required_failed.len()
    }

    pub fn required_total(&self) -> usize {
        self.required_passed.len() + self.required_failed.len()
    }

    pub fn desired_total(&self) -> usize {
        self.desired_met.len() + self.desired_missing.len()
    }
}

/// Run every constraint in order; no short-circuit so reports list every gap.
pub(crate) fn run_checks(facts: &Facts, constraints: &[Constraint]) -> Vec<CheckResult> {
    constraints
        .iter()
        .map(|constraint| check(facts, constraint))
        .collect()
}

/// Evaluate one position against the fact mapping.
pub fn evaluate_position(facts: &Facts, position: &Position) -> PositionResult {
    PositionResult::from_checks(
        &position.name,
        run_checks(facts, &position.required),
        run_checks(facts, &position.desired),
    )
}

/// Evaluate every position, preserving catalog order.
pub fn evaluate_all(facts: &Facts, positions: &[Position]) -> Vec<PositionResult> {
    positions
        .iter()
        .map(|position| evaluate_position(facts, position))
        .collect()
}

pub(crate) fn match_pct(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    passed as f64 / total as f64 * 100.0
}
