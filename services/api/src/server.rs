use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_matcher::config::AppConfig;
use job_matcher::error::AppError;
use job_matcher::matching::MatchingService;
use job_matcher::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // A broken catalog must stop startup before the listener is bound.
    let catalog = Arc::new(config.catalog.load()?);
    info!(positions = catalog.len(), "position catalog ready");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let matching_service = Arc::new(MatchingService::new(catalog));

    let app = with_matching_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
