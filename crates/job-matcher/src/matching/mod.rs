//! Rule evaluation engine for candidate qualifications.
//!
//! Facts flow one way: a [`Facts`] mapping and a [`PositionCatalog`] go in, every
//! [`Constraint`] is checked independently, checks are aggregated per [`Position`], and an
//! ordered list of [`PositionResult`]s comes out together with an optional [`Trace`]. There
//! is no rule chaining and no shared mutable state.

pub mod catalog;
pub mod constraint;
pub mod engine;
pub mod facts;
pub mod intake;
pub mod position;
pub mod report;
pub mod router;
pub mod service;
pub mod trace;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, PositionCatalog};
pub use constraint::{check, CheckResult, Constraint, Operator, UnknownOperator};
pub use engine::{evaluate_traced, InferenceEngine, TracedEvaluation};
pub use facts::{keys, FactValue, Facts};
pub use intake::{
    CandidateProfile, DegreeField, DegreeLevel, Education, ExperienceYears, IntakeError,
    IntakeOption, IntakeVocabulary,
};
pub use position::{evaluate_all, evaluate_position, Position, PositionResult};
pub use report::{CandidateSummary, CheckView, MatchReport, MatchSummary, PositionReport};
pub use router::{matching_router, EvaluateRequest, EvaluateResponse};
pub use service::{MatchingService, MatchingServiceError};
pub use trace::{CheckPool, Trace, TraceEntry};
