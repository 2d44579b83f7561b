use super::common::*;
use crate::matching::{evaluate_all, evaluate_position, keys, Constraint, Facts, Position};

#[test]
fn entry_level_candidate_with_all_coursework_qualifies() {
    let catalog = standard_catalog();
    let position = position(&catalog, "Entry-Level Python Engineer");

    let result = evaluate_position(&entry_level_facts(), position);

    assert_eq!(position.required.len(), 4);
    assert!(result.qualified);
    assert_eq!(result.required_match_pct, 100.0);
    assert_eq!(result.required_passed.len(), 4);
    assert!(result.required_failed.is_empty());
}

#[test]
fn python_engineer_reports_every_missing_requirement() {
    let catalog = standard_catalog();
    let position = position(&catalog, "Python Engineer");

    let result = evaluate_position(&junior_python_facts(), position);

    assert!(!result.qualified);
    let failed: Vec<_> = result
        .required_failed
        .iter()
        .map(|check| check.field.as_str())
        .collect();
    assert_eq!(failed, vec![keys::PYTHON_YEARS, keys::DATA_YEARS]);
    assert_eq!(result.required_passed.len(), 1);
    assert_eq!(result.required_passed[0].field, keys::HAS_BACHELORS_CS);
    assert_pct(result.required_match_pct, 33.3);
}

#[test]
fn empty_facts_fail_every_required_check() {
    let catalog = standard_catalog();

    for result in evaluate_all(&Facts::new(), catalog.positions()) {
        assert!(!result.qualified, "{} should not qualify", result.name);
        assert!(result.required_passed.is_empty());
        assert_eq!(result.required_match_pct, 0.0);
    }
}

#[test]
fn position_without_desired_criteria_signals_not_applicable() {
    let catalog = standard_catalog();
    let position = position(&catalog, "Senior Knowledge Engineer");

    let result = evaluate_position(&Facts::new().with(keys::HAS_GIT, true), position);

    assert!(position.desired.is_empty());
    assert!(result.desired_met.is_empty());
    assert!(result.desired_missing.is_empty());
    assert!(!result.has_desired_criteria());
    assert_eq!(result.desired_match_pct, 0.0);
}

#[test]
fn desired_outcomes_never_change_qualification() {
    let catalog = standard_catalog();
    let position = position(&catalog, "Python Engineer");
    let facts = Facts::new()
        .with(keys::PYTHON_YEARS, 5)
        .with(keys::DATA_YEARS, 2)
        .with(keys::HAS_BACHELORS_CS, true);

    let without_desired = evaluate_position(&facts, position);
    let with_desired = evaluate_position(
        &facts
            .clone()
            .with(keys::AGILE_PROJECTS, true)
            .with(keys::HAS_GIT, true),
        position,
    );

    assert!(without_desired.qualified);
    assert!(with_desired.qualified);
    assert!(without_desired.has_desired_criteria());
    assert_eq!(without_desired.desired_missing.len(), 2);
    assert_eq!(without_desired.desired_match_pct, 0.0);
    assert_eq!(with_desired.desired_match_pct, 100.0);
}

#[test]
fn partitions_preserve_constraint_order_and_cover_every_check() {
    let position = mixed_position();
    let facts = Facts::new()
        .with(keys::PYTHON_YEARS, 1)
        .with(keys::HAS_GIT, true)
        .with(keys::AGILE_YEARS, 12)
        .with(keys::HAS_CSM, true);

    let result = evaluate_position(&facts, &position);

    assert_eq!(
        result.required_passed.len() + result.required_failed.len(),
        position.required.len()
    );
    assert_eq!(
        result.desired_met.len() + result.desired_missing.len(),
        position.desired.len()
    );
    let failed: Vec<_> = result
        .required_failed
        .iter()
        .map(|check| check.field.as_str())
        .collect();
    assert_eq!(
        failed,
        vec![
            keys::PYTHON_YEARS,
            keys::AGILE_YEARS,
            keys::HIGHEST_DEGREE_OBTAINED
        ]
    );
    assert_eq!(result.qualified, result.required_failed.is_empty());
    assert_eq!(result.required_match_pct, 25.0);
    assert_eq!(result.desired_match_pct, 50.0);
    assert_pct(result.total_match_pct, 33.3);
}

#[test]
fn position_without_required_constraints_reports_zero_percent() {
    let position = Position::new("Volunteer", Vec::new())
        .with_desired(vec![Constraint::flag(keys::HAS_GIT, "Git experience")]);

    let result = evaluate_position(&Facts::new().with(keys::HAS_GIT, true), &position);

    assert_eq!(result.required_match_pct, 0.0);
    assert!(result.qualified);
    assert_eq!(result.desired_match_pct, 100.0);
    assert_eq!(result.total_match_pct, 100.0);
}

#[test]
fn position_without_any_constraints_has_zero_total() {
    let position = Position::new("Placeholder", Vec::new());

    let result = evaluate_position(&Facts::new(), &position);

    assert_eq!(result.total_match_pct, 0.0);
    assert_eq!(result.required_total(), 0);
    assert_eq!(result.desired_total(), 0);
}

#[test]
fn percentages_stay_within_bounds() {
    let catalog = standard_catalog();
    let fact_sets = [Facts::new(), entry_level_facts(), junior_python_facts()];

    for facts in &fact_sets {
        for result in evaluate_all(facts, catalog.positions()) {
            for pct in [
                result.required_match_pct,
                result.desired_match_pct,
                result.total_match_pct,
            ] {
                assert!((0.0..=100.0).contains(&pct), "{pct} out of range");
            }
        }
    }
}

#[test]
fn evaluation_is_idempotent() {
    let catalog = standard_catalog();
    let facts = junior_python_facts();

    let first = evaluate_all(&facts, catalog.positions());
    let second = evaluate_all(&facts, catalog.positions());

    assert_eq!(first, second);
    let names: Vec<_> = first.iter().map(|result| result.name.as_str()).collect();
    let catalog_names: Vec<_> = catalog.iter().map(|position| position.name.as_str()).collect();
    assert_eq!(names, catalog_names);
}
