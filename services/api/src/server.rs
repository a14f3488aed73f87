use std::sync::atomic::Ordering;
use std::sync::Arc;

use acredita::config::AppConfig;
use acredita::error::AppError;
use acredita::telemetry;
use acredita::workflows::accreditation::{
    AccreditationService, ClassifierConfig, RosterImporter,
};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPeriodStore};
use crate::routes::with_accreditation_routes;

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

    let store = match args.roster.take() {
        Some(path) => {
            let rows = RosterImporter::from_path(&path)?;
            info!(rows = rows.len(), path = %path.display(), "roster loaded");
            Arc::new(InMemoryPeriodStore::from_roster(&rows))
        }
        None => Arc::new(InMemoryPeriodStore::seed_demo(Local::now().date_naive())),
    };
    let service = Arc::new(AccreditationService::new(
        store.clone(),
        ClassifierConfig::default(),
    ));

    let app = with_accreditation_routes(service)
        .layer(Extension(store))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "accreditation tracker ready");

    axum::serve(listener, app).await?;
    Ok(())
}
