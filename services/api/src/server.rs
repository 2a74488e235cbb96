use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredAuditSink};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dropout_risk::config::AppConfig;
use dropout_risk::error::AppError;
use dropout_risk::telemetry;
use dropout_risk::workflow::AssessmentWorkflow;
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

    let audit_sink = ConfiguredAuditSink::from_config(&config.audit)?;
    let audit_target = audit_sink.describe();
    let workflow = Arc::new(AssessmentWorkflow::new(Arc::new(audit_sink)));

    let app = with_assessment_routes(workflow)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, audit = %audit_target, "dropout risk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
