use std::io::Cursor;
use std::sync::Arc;

use acredita::error::AppError;
use acredita::workflows::accreditation::{
    accreditation_router, AccreditationService, PeriodStore, RosterImporter,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::infra::{AppState, InMemoryPeriodStore};

#[derive(Debug, Deserialize)]
pub(crate) struct RosterUploadRequest {
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterUploadResponse {
    pub(crate) rows: usize,
    pub(crate) faculties: usize,
}

pub(crate) fn with_accreditation_routes<S>(service: Arc<AccreditationService<S>>) -> axum::Router
where
    S: PeriodStore + 'static,
{
    accreditation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/accreditation/roster",
            axum::routing::post(roster_upload_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Replace the serving directory with an uploaded roster export.
pub(crate) async fn roster_upload_endpoint(
    Extension(store): Extension<Arc<InMemoryPeriodStore>>,
    Json(payload): Json<RosterUploadRequest>,
) -> Result<Json<RosterUploadResponse>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let rows = RosterImporter::from_reader(reader)?;
    store.replace_roster(&rows);

    Ok(Json(RosterUploadResponse {
        rows: rows.len(),
        faculties: store.faculty_count(),
    }))
}
