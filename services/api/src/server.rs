use crate::cli::ServeArgs;
use crate::infra::{resolve_population, AppState};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use enroll_insight::config::AppConfig;
use enroll_insight::error::AppError;
use enroll_insight::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // The session population is generated once at startup and lives for the
    // lifetime of the process; there is no persistence behind it.
    let population = resolve_population(&config.dashboard, args.population, args.seed)?;
    let population_size = population.records().len();

    let app = with_dashboard_routes(population)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        population_size,
        "enrollment insight dashboard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
