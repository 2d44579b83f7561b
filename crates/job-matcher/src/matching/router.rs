use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::PositionCatalog;
use super::facts::Facts;
use super::intake::{CandidateProfile, IntakeVocabulary};
use super::position::PositionResult;
use super::service::{MatchingService, MatchingServiceError};

/// Body accepted by the fact evaluation endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub facts: Facts,
    #[serde(default)]
    pub include_trace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub qualified_count: usize,
    pub results: Vec<PositionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<String>>,
}

/// Router builder exposing the catalog, intake vocabulary and evaluation endpoints.
pub fn matching_router(service: Arc<MatchingService>) -> Router {
    Router::new()
        .route("/api/v1/positions", get(positions_handler))
        .route("/api/v1/vocabulary", get(vocabulary_handler))
        .route("/api/v1/matches", post(evaluate_handler))
        .route("/api/v1/matches/candidate", post(candidate_handler))
        .with_state(service)
}

pub(crate) async fn positions_handler(
    State(service): State<Arc<MatchingService>>,
) -> Json<PositionCatalog> {
    Json(service.catalog().clone())
}

pub(crate) async fn vocabulary_handler() -> Json<IntakeVocabulary> {
    Json(IntakeVocabulary::offered())
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<MatchingService>>,
    Json(request): Json<EvaluateRequest>,
) -> Json<EvaluateResponse> {
    let (results, trace) = if request.include_trace {
        let evaluation = service.evaluate_traced(&request.facts);
        (evaluation.results, Some(evaluation.trace.lines()))
    } else {
        (service.evaluate(&request.facts), None)
    };

    Json(EvaluateResponse {
        qualified_count: results.iter().filter(|result| result.qualified).count(),
        results,
        trace,
    })
}

pub(crate) async fn candidate_handler(
    State(service): State<Arc<MatchingService>>,
    Json(candidate): Json<CandidateProfile>,
) -> Response {
    match service.assess(&candidate, Local::now().naive_local()) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(MatchingServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
