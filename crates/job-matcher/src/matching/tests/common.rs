use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::matching::intake::{
    CandidateProfile, DegreeField, DegreeLevel, Education, ExperienceYears, CERT_PMI_LEAN,
};
use crate::matching::{
    keys, Constraint, Facts, MatchingService, Operator, Position, PositionCatalog,
};

pub(super) fn standard_catalog() -> PositionCatalog {
    PositionCatalog::standard()
}

pub(super) fn position<'a>(catalog: &'a PositionCatalog, name: &str) -> &'a Position {
    catalog
        .get(name)
        .unwrap_or_else(|| panic!("catalog is missing position {name}"))
}

pub(super) fn entry_level_facts() -> Facts {
    Facts::new()
        .with(keys::PYTHON_COURSEWORK, true)
        .with(keys::SE_COURSEWORK, true)
        .with(keys::AGILE_COURSEWORK, true)
        .with(keys::HAS_BACHELORS_CS, true)
}

pub(super) fn junior_python_facts() -> Facts {
    Facts::new()
        .with(keys::PYTHON_YEARS, 2)
        .with(keys::DATA_YEARS, 0)
        .with(keys::HAS_BACHELORS_CS, true)
}

/// Position mixing every operator so trace and partition ordering can be asserted.
pub(super) fn mixed_position() -> Position {
    Position::new(
        "Platform Engineer",
        vec![
            Constraint::at_least(keys::PYTHON_YEARS, 3.0, "Three years of Python"),
            Constraint::flag(keys::HAS_GIT, "Git experience"),
            Constraint::at_most(keys::AGILE_YEARS, 10.0, "No more than ten agile years"),
            Constraint::new(
                keys::HIGHEST_DEGREE_OBTAINED,
                Operator::Eq,
                DegreeLevel::Master.label(),
                "Master's degree on file",
            ),
        ],
    )
    .with_desired(vec![
        Constraint::flag(keys::HAS_AWS, "AWS certification"),
        Constraint::flag(keys::HAS_CSM, "Scrum Master certification"),
    ])
}

pub(super) fn candidate() -> CandidateProfile {
    CandidateProfile {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        educations: vec![
            Education {
                level: DegreeLevel::Bachelor,
                field: DegreeField::ComputerScience,
            },
            Education {
                level: DegreeLevel::Master,
                field: DegreeField::DataScience,
            },
        ],
        courses: vec![
            "Python Programming".to_string(),
            "Software Engineering".to_string(),
        ],
        courses_other: Some("Kanban for teams".to_string()),
        certifications: vec![CERT_PMI_LEAN.to_string()],
        certifications_other: None,
        experience: ExperienceYears {
            python: 4,
            data: 2,
            expert_systems: 0,
            project_mgmt: 1,
            agile: 3,
            data_architecture: 0,
        },
        has_git: true,
    }
}

pub(super) fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 1)
        .expect("valid date")
        .and_hms_opt(9, 30, 0)
        .expect("valid time")
}

pub(super) fn matching_service() -> Arc<MatchingService> {
    Arc::new(MatchingService::new(Arc::new(standard_catalog())))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_pct(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.05,
        "expected {expected:.2}%, got {actual:.4}%"
    );
}
