use super::common::*;
use crate::matching::{
    evaluate_position, keys, CatalogError, Constraint, FactValue, Facts, Operator, Position,
    PositionCatalog,
};

const VALID_CATALOG: &str = r#"[
    {
        "name": "Data Engineer",
        "required": [
            {"field": "data_years", "operator": "min", "expected": 2, "message": "Two years of data work"},
            {"field": "data_coursework", "operator": "bool", "expected": true, "message": "Data coursework"}
        ],
        "desired": [
            {"field": "has_gcp", "operator": "bool", "expected": true, "message": "GCP certification"}
        ]
    },
    {
        "name": "Scrum Coach",
        "required": [
            {"field": "agile_years", "operator": "max", "expected": 15, "message": "Hands-on agile"}
        ]
    }
]"#;

#[test]
fn standard_catalog_lists_positions_in_order() {
    let catalog = standard_catalog();

    let names: Vec<_> = catalog.iter().map(|position| position.name.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "Entry-Level Python Engineer",
            "Python Engineer",
            "Project Manager",
            "Senior Knowledge Engineer",
        ]
    );
}

#[test]
fn project_manager_requires_pmi_lean_certification() {
    let catalog = standard_catalog();
    let manager = position(&catalog, "Project Manager");
    let facts = Facts::new()
        .with(keys::PROJECT_MGMT_YEARS, 3)
        .with(keys::AGILE_YEARS, 2)
        .with(keys::HAS_PMI_LEAN, false);

    let result = evaluate_position(&facts, manager);

    assert!(manager.desired.is_empty());
    assert!(!result.qualified);
    assert_eq!(result.required_failed.len(), 1);
    assert_eq!(result.required_failed[0].field, keys::HAS_PMI_LEAN);
    assert!(!result.has_desired_criteria());

    let certified = evaluate_position(&facts.with(keys::HAS_PMI_LEAN, true), manager);
    assert!(certified.qualified);
}

#[test]
fn standard_catalog_passes_validation() {
    let positions = standard_catalog().positions().to_vec();

    let validated = PositionCatalog::new(positions).expect("standard catalog is valid");

    assert_eq!(validated, standard_catalog());
}

#[test]
fn loads_catalog_from_json() {
    let catalog = PositionCatalog::from_json_str(VALID_CATALOG).expect("catalog parses");

    assert_eq!(catalog.len(), 2);
    let data = position(&catalog, "Data Engineer");
    assert_eq!(data.required[0].operator, Operator::Min);
    assert_eq!(data.required[0].expected, FactValue::Number(2.0));
    assert_eq!(data.desired.len(), 1);
    let coach = position(&catalog, "Scrum Coach");
    assert!(coach.desired.is_empty());
    assert_eq!(coach.required[0].operator, Operator::Max);
}

#[test]
fn loads_catalog_from_reader() {
    let catalog = PositionCatalog::from_reader(VALID_CATALOG.as_bytes()).expect("catalog parses");

    assert!(catalog.get("Scrum Coach").is_some());
    assert!(catalog.get("Astronaut").is_none());
}

#[test]
fn rejects_unknown_operator_at_load_time() {
    let raw = r#"[{"name": "Analyst", "required": [
        {"field": "data_years", "operator": "between", "expected": 2, "message": "Data"}
    ]}]"#;

    let err = PositionCatalog::from_json_str(raw).expect_err("operator must be known");

    match err {
        CatalogError::UnknownOperator {
            position,
            field,
            operator,
        } => {
            assert_eq!(position, "Analyst");
            assert_eq!(field, "data_years");
            assert_eq!(operator, "between");
        }
        other => panic!("expected unknown operator, got {other:?}"),
    }
}

#[test]
fn rejects_position_without_required_list() {
    let raw = r#"[{"name": "Analyst", "desired": []}]"#;

    let err = PositionCatalog::from_json_str(raw).expect_err("required list is mandatory");

    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn rejects_position_without_name() {
    let raw = r#"[{"required": []}]"#;

    let err = PositionCatalog::from_json_str(raw).expect_err("name is mandatory");

    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn rejects_blank_and_duplicate_names() {
    let blank = PositionCatalog::new(vec![Position::new("  ", Vec::new())])
        .expect_err("blank names are rejected");
    assert!(matches!(blank, CatalogError::BlankName { index: 0 }));

    let duplicate = PositionCatalog::new(vec![
        Position::new("Analyst", Vec::new()),
        Position::new("Analyst", Vec::new()),
    ])
    .expect_err("duplicate names are rejected");
    assert!(matches!(duplicate, CatalogError::DuplicatePosition(name) if name == "Analyst"));
}

#[test]
fn rejects_blank_constraint_field() {
    let err = PositionCatalog::new(vec![Position::new(
        "Analyst",
        vec![Constraint::flag("", "Something")],
    )])
    .expect_err("blank field is rejected");

    assert!(matches!(err, CatalogError::BlankField { .. }));
}

#[test]
fn rejects_non_numeric_bounds() {
    let err = PositionCatalog::new(vec![Position::new("Analyst", Vec::new()).with_desired(
        vec![Constraint::new("data_years", Operator::Max, "lots", "Data")],
    )])
    .expect_err("bounds must be numeric");

    match err {
        CatalogError::NonNumericBound {
            operator, expected, ..
        } => {
            assert_eq!(operator, Operator::Max);
            assert_eq!(expected, FactValue::Text("lots".to_string()));
        }
        other => panic!("expected non numeric bound, got {other:?}"),
    }
}

#[test]
fn rejects_empty_catalog() {
    let err = PositionCatalog::from_json_str("[]").expect_err("catalog must not be empty");

    assert!(matches!(err, CatalogError::Empty));
}
