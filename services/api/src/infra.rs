use clap::ValueEnum;
use job_matcher::config::AppConfig;
use job_matcher::error::AppError;
use job_matcher::matching::{MatchingService, PositionCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// How command output is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolve the catalog for a one-shot command. An explicit path beats `JOB_MATCHER_CATALOG`.
pub(crate) fn load_catalog(path: Option<PathBuf>) -> Result<Arc<PositionCatalog>, AppError> {
    let mut catalog_config = AppConfig::load()?.catalog;
    if let Some(path) = path {
        catalog_config.path = Some(path);
    }

    Ok(Arc::new(catalog_config.load()?))
}

pub(crate) fn matching_service(path: Option<PathBuf>) -> Result<MatchingService, AppError> {
    Ok(MatchingService::new(load_catalog(path)?))
}

pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
