use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fact keys produced by candidate intake and consumed by the built-in catalog.
pub mod keys {
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";

    pub const HIGHEST_DEGREE_OBTAINED: &str = "highest_degree_obtained";
    pub const HAS_BACHELORS_CS: &str = "has_bachelors_cs";
    pub const HAS_MASTERS_CS: &str = "has_masters_cs";

    pub const COURSES_SELECTED: &str = "courses_selected";
    pub const COURSES_OTHER: &str = "courses_other";
    pub const PYTHON_COURSEWORK: &str = "python_coursework";
    pub const SE_COURSEWORK: &str = "se_coursework";
    pub const AGILE_COURSEWORK: &str = "agile_coursework";
    pub const EXPERT_SYSTEMS_COURSEWORK: &str = "expert_systems_coursework";
    pub const DATA_COURSEWORK: &str = "data_coursework";

    pub const CERTS_SELECTED: &str = "certs_selected";
    pub const CERTS_OTHER: &str = "certs_other";
    pub const HAS_PMI_LEAN: &str = "has_pmi_lean";
    pub const HAS_CSM: &str = "has_csm";
    pub const HAS_PMP: &str = "has_pmp";
    pub const HAS_AWS: &str = "has_aws";
    pub const HAS_AZURE: &str = "has_azure";
    pub const HAS_GCP: &str = "has_gcp";
    pub const HAS_CISSP: &str = "has_cissp";

    pub const PYTHON_YEARS: &str = "python_years";
    pub const DATA_YEARS: &str = "data_years";
    pub const EXPERT_SYSTEMS_YEARS: &str = "expert_systems_years";
    pub const PROJECT_MGMT_YEARS: &str = "project_mgmt_years";
    pub const AGILE_YEARS: &str = "agile_years";
    pub const DATA_ARCHITECTURE_YEARS: &str = "data_architecture_years";
    pub const AGILE_PROJECTS: &str = "agile_projects";
    pub const HAS_GIT: &str = "has_git";
}

/// Value representation for a single fact so constraint checks can match on its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FactValue {
    /// Truthiness used by `bool` constraints: false, zero, empty text and empty lists are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FactValue::Bool(value) => *value,
            FactValue::Number(value) => *value != 0.0,
            FactValue::Text(value) => !value.is_empty(),
            FactValue::List(values) => !values.is_empty(),
        }
    }

    /// Numeric view used by `min`/`max` constraints. Lists and unparsable text have none.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            FactValue::Bool(true) => 1.0,
            FactValue::Bool(false) => 0.0,
            FactValue::Number(value) => *value,
            FactValue::Text(value) => value.trim().parse::<f64>().ok()?,
            FactValue::List(_) => return None,
        };

        number.is_finite().then_some(number)
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Bool(value) => write!(f, "{value}"),
            FactValue::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            FactValue::Number(value) => write!(f, "{value}"),
            FactValue::Text(value) => write!(f, "{value}"),
            FactValue::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FactValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u8> for FactValue {
    fn from(value: u8) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for FactValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for FactValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FactValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// Renders a resolved fact for reports and traces, spelling out absent values.
pub fn describe_actual(actual: Option<&FactValue>) -> String {
    match actual {
        Some(value) => value.to_string(),
        None => "not provided".to_string(),
    }
}

/// Read-only mapping from fact key to value handed to the engine.
///
/// JSON `null` entries deserialize as absent keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<FactValue>>",
    into = "BTreeMap<String, FactValue>"
)]
pub struct Facts {
    values: BTreeMap<String, FactValue>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by intake and tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FactValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FactValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FactValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl From<BTreeMap<String, Option<FactValue>>> for Facts {
    fn from(raw: BTreeMap<String, Option<FactValue>>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect();
        Self { values }
    }
}

impl From<Facts> for BTreeMap<String, FactValue> {
    fn from(facts: Facts) -> Self {
        facts.values
    }
}

impl<K, V> FromIterator<(K, V)> for Facts
where
    K: Into<String>,
    V: Into<FactValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut facts = Facts::new();
        facts.extend(iter);
        facts
    }
}

impl<K, V> Extend<(K, V)> for Facts
where
    K: Into<String>,
    V: Into<FactValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
