use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::info;

use super::catalog::PositionCatalog;
use super::engine::{evaluate_traced, TracedEvaluation};
use super::facts::Facts;
use super::intake::{CandidateProfile, IntakeError};
use super::position::{evaluate_all, PositionResult};
use super::report::{CandidateSummary, MatchReport};

/// Service composing the shared catalog, intake normalisation and report export.
pub struct MatchingService {
    catalog: Arc<PositionCatalog>,
}

impl MatchingService {
    pub fn new(catalog: Arc<PositionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PositionCatalog {
        &self.catalog
    }

    /// Evaluate an already normalised fact mapping.
    pub fn evaluate(&self, facts: &Facts) -> Vec<PositionResult> {
        evaluate_all(facts, self.catalog.positions())
    }

    pub fn evaluate_traced(&self, facts: &Facts) -> TracedEvaluation {
        evaluate_traced(facts, self.catalog.positions())
    }

    /// Validate and normalise raw candidate answers, then build the exportable report.
    pub fn assess(
        &self,
        candidate: &CandidateProfile,
        generated_at: NaiveDateTime,
    ) -> Result<MatchReport, MatchingServiceError> {
        candidate.validate()?;

        let facts = candidate.facts();
        let results = self.evaluate(&facts);
        let report = MatchReport::new(
            CandidateSummary {
                first_name: candidate.first_name.clone(),
                last_name: candidate.last_name.clone(),
                generated_at,
            },
            &results,
        );

        info!(
            candidate = %candidate.full_name(),
            qualified = report.summary.qualified_count,
            positions = report.summary.total_positions,
            "candidate assessed"
        );
        Ok(report)
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
}
