use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::constraint::{Constraint, Operator};
use super::facts::{keys, FactValue};
use super::position::Position;

/// Integrity failures found while loading a position catalog. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read position catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid position catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("position catalog contains no positions")]
    Empty,
    #[error("position #{index} has a blank name")]
    BlankName { index: usize },
    #[error("position '{0}' is defined more than once")]
    DuplicatePosition(String),
    #[error("position '{position}' has a constraint with a blank field")]
    BlankField { position: String },
    #[error("position '{position}' uses unknown operator '{operator}' on field '{field}'")]
    UnknownOperator {
        position: String,
        field: String,
        operator: String,
    },
    #[error("position '{position}' compares '{field}' with {operator} against non-numeric bound {expected}")]
    NonNumericBound {
        position: String,
        field: String,
        operator: Operator,
        expected: FactValue,
    },
}

/// On-disk shape of a position; the operator stays a string until validated.
#[derive(Debug, Deserialize)]
struct PositionEntry {
    name: String,
    required: Vec<ConstraintEntry>,
    #[serde(default)]
    desired: Vec<ConstraintEntry>,
}

#[derive(Debug, Deserialize)]
struct ConstraintEntry {
    field: String,
    operator: String,
    expected: FactValue,
    message: String,
}

impl ConstraintEntry {
    fn into_constraint(self, position: &str) -> Result<Constraint, CatalogError> {
        let operator = self
            .operator
            .parse::<Operator>()
            .map_err(|err| CatalogError::UnknownOperator {
                position: position.to_string(),
                field: self.field.clone(),
                operator: err.0,
            })?;

        Ok(Constraint {
            field: self.field,
            operator,
            expected: self.expected,
            message: self.message,
        })
    }
}

/// Immutable, validated set of positions shared by every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionCatalog {
    positions: Vec<Position>,
}

impl PositionCatalog {
    /// Validate programmatically built positions.
    pub fn new(positions: Vec<Position>) -> Result<Self, CatalogError> {
        validate(&positions)?;
        Ok(Self { positions })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<PositionEntry> = serde_json::from_str(raw)?;
        Self::from_entries(entries)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let entries: Vec<PositionEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&raw)?;
        info!(path = %path.display(), positions = catalog.len(), "loaded position catalog");
        Ok(catalog)
    }

    fn from_entries(entries: Vec<PositionEntry>) -> Result<Self, CatalogError> {
        let positions = entries
            .into_iter()
            .map(|entry| {
                let required = entry
                    .required
                    .into_iter()
                    .map(|constraint| constraint.into_constraint(&entry.name))
                    .collect::<Result<Vec<_>, _>>()?;
                let desired = entry
                    .desired
                    .into_iter()
                    .map(|constraint| constraint.into_constraint(&entry.name))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Position {
                    name: entry.name,
                    required,
                    desired,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Self::new(positions)
    }

    /// The built-in catalog of four positions.
    pub fn standard() -> Self {
        let positions = vec![
            Position::new(
                "Entry-Level Python Engineer",
                vec![
                    Constraint::flag(keys::PYTHON_COURSEWORK, "Python course work is required"),
                    Constraint::flag(
                        keys::SE_COURSEWORK,
                        "Software Engineering course work is required",
                    ),
                    Constraint::flag(keys::AGILE_COURSEWORK, "Agile course work is required"),
                    Constraint::flag(keys::HAS_BACHELORS_CS, "Bachelor in CS is required"),
                ],
            ),
            Position::new(
                "Python Engineer",
                vec![
                    Constraint::at_least(
                        keys::PYTHON_YEARS,
                        3.0,
                        "At least 3 years Python development is required",
                    ),
                    Constraint::at_least(
                        keys::DATA_YEARS,
                        1.0,
                        "At least 1 year data development is required",
                    ),
                    Constraint::flag(keys::HAS_BACHELORS_CS, "Bachelor in CS is required"),
                ],
            )
            .with_desired(vec![
                Constraint::flag(
                    keys::AGILE_PROJECTS,
                    "Experience in Agile projects is desired",
                ),
                Constraint::flag(keys::HAS_GIT, "Git experience is desired"),
            ]),
            Position::new(
                "Project Manager",
                vec![
                    Constraint::at_least(
                        keys::PROJECT_MGMT_YEARS,
                        3.0,
                        "At least 3 years managing software projects is required",
                    ),
                    Constraint::at_least(
                        keys::AGILE_YEARS,
                        2.0,
                        "At least 2 years experience in Agile projects is required",
                    ),
                    Constraint::flag(
                        keys::HAS_PMI_LEAN,
                        "PMI Lean Project Management Certification is required",
                    ),
                ],
            ),
            Position::new(
                "Senior Knowledge Engineer",
                vec![
                    Constraint::at_least(
                        keys::PYTHON_YEARS,
                        4.0,
                        "At least 4 years using Python to develop is required",
                    ),
                    Constraint::at_least(
                        keys::EXPERT_SYSTEMS_YEARS,
                        2.0,
                        "At least 2 years developing Expert Systems is required",
                    ),
                    Constraint::at_least(
                        keys::DATA_ARCHITECTURE_YEARS,
                        2.0,
                        "At least 2 years data architecture and data development is required",
                    ),
                    Constraint::flag(keys::HAS_MASTERS_CS, "Masters in CS is required"),
                ],
            ),
        ];

        Self { positions }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn get(&self, name: &str) -> Option<&Position> {
        self.positions.iter().find(|position| position.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<'a> IntoIterator for &'a PositionCatalog {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate(positions: &[Position]) -> Result<(), CatalogError> {
    if positions.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for (index, position) in positions.iter().enumerate() {
        if position.name.trim().is_empty() {
            return Err(CatalogError::BlankName { index });
        }
        if !seen.insert(position.name.as_str()) {
            return Err(CatalogError::DuplicatePosition(position.name.clone()));
        }

        for constraint in position.required.iter().chain(&position.desired) {
            if constraint.field.trim().is_empty() {
                return Err(CatalogError::BlankField {
                    position: position.name.clone(),
                });
            }
            if constraint.operator.requires_numeric_bound()
                && !matches!(constraint.expected, FactValue::Number(bound) if bound.is_finite())
            {
                return Err(CatalogError::NonNumericBound {
                    position: position.name.clone(),
                    field: constraint.field.clone(),
                    operator: constraint.operator,
                    expected: constraint.expected.clone(),
                });
            }
        }
    }

    Ok(())
}
