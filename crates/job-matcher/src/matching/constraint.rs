use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::facts::{FactValue, Facts};

/// Comparison applied by a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Truthiness of the fact equals truthiness of the expected value.
    Bool,
    /// Numeric fact is greater than or equal to the expected bound.
    Min,
    /// Numeric fact is less than or equal to the expected bound.
    Max,
    /// Fact equals the expected value, variant and payload.
    Eq,
}

impl Operator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Bool => "bool",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Eq => "eq",
        }
    }

    pub const fn requires_numeric_bound(self) -> bool {
        matches!(self, Operator::Min | Operator::Max)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown constraint operator '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "bool" => Ok(Operator::Bool),
            "min" => Ok(Operator::Min),
            "max" => Ok(Operator::Max),
            "eq" => Ok(Operator::Eq),
            _ => Err(UnknownOperator(raw.to_string())),
        }
    }
}

/// Atomic rule referencing exactly one fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub field: String,
    pub operator: Operator,
    pub expected: FactValue,
    pub message: String,
}

impl Constraint {
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        expected: impl Into<FactValue>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            expected: expected.into(),
            message: message.into(),
        }
    }

    /// `bool` constraint expecting the fact to be truthy.
    pub fn flag(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Operator::Bool, true, message)
    }

    pub fn at_least(field: impl Into<String>, bound: f64, message: impl Into<String>) -> Self {
        Self::new(field, Operator::Min, bound, message)
    }

    pub fn at_most(field: impl Into<String>, bound: f64, message: impl Into<String>) -> Self {
        Self::new(field, Operator::Max, bound, message)
    }

    pub fn equals(
        field: impl Into<String>,
        expected: impl Into<FactValue>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(field, Operator::Eq, expected, message)
    }
}

/// Outcome of one constraint check, carrying the inputs needed to explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub passed: bool,
    pub message: String,
    pub expected: FactValue,
    pub actual: Option<FactValue>,
    pub field: String,
    pub operator: Operator,
}

/// Evaluate a single constraint against the fact mapping.
///
/// Missing or ill-typed facts never error; they simply fail the check.
pub fn check(facts: &Facts, constraint: &Constraint) -> CheckResult {
    let actual = facts.get(&constraint.field);
    let passed = passes(constraint.operator, actual, &constraint.expected);

    CheckResult {
        passed,
        message: constraint.message.clone(),
        expected: constraint.expected.clone(),
        actual: actual.cloned(),
        field: constraint.field.clone(),
        operator: constraint.operator,
    }
}

fn passes(operator: Operator, actual: Option<&FactValue>, expected: &FactValue) -> bool {
    match operator {
        Operator::Bool => actual.is_some_and(FactValue::is_truthy) == expected.is_truthy(),
        Operator::Min => compare_numbers(actual, expected, |value, bound| value >= bound),
        Operator::Max => compare_numbers(actual, expected, |value, bound| value <= bound),
        Operator::Eq => actual == Some(expected),
    }
}

fn compare_numbers(
    actual: Option<&FactValue>,
    expected: &FactValue,
    compare: impl Fn(f64, f64) -> bool,
) -> bool {
    match (actual.and_then(FactValue::as_number), expected.as_number()) {
        (Some(value), Some(bound)) => compare(value, bound),
        _ => false,
    }
}
