use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CareerId, DateWindow, ModalityId, PeriodId};
use super::report::views::CareerBreakdownView;
use super::repository::{PeriodStore, StoreError};
use super::service::{AccreditationService, PeriodAction, ServiceError};

/// Router builder exposing the classification and workflow endpoints.
pub fn accreditation_router<S>(service: Arc<AccreditationService<S>>) -> Router
where
    S: PeriodStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/accreditation/careers/:career_id/status",
            get(status_handler::<S>),
        )
        .route(
            "/api/v1/accreditation/careers/:career_id/breakdown",
            get(breakdown_handler::<S>),
        )
        .route(
            "/api/v1/accreditation/periods",
            post(open_period_handler::<S>),
        )
        .route(
            "/api/v1/accreditation/periods/:period_id/approval",
            post(record_approval_handler::<S>),
        )
        .route("/api/v1/accreditation/report", get(report_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusQuery {
    as_of: Option<NaiveDate>,
    standard: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AsOfQuery {
    as_of: Option<NaiveDate>,
}

/// Request body for the find-or-create endpoint. Process bounds are
/// either both present or both absent.
#[derive(Debug, Deserialize)]
pub(crate) struct OpenPeriodRequest {
    career_id: u64,
    modality_id: u64,
    process_start: Option<NaiveDate>,
    process_end: Option<NaiveDate>,
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordApprovalRequest {
    approval_start: NaiveDate,
    approval_end: NaiveDate,
}

fn reference_or_today(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) async fn status_handler<S>(
    State(service): State<Arc<AccreditationService<S>>>,
    Path(career_id): Path<u64>,
    Query(query): Query<StatusQuery>,
) -> Response
where
    S: PeriodStore + 'static,
{
    let career = CareerId(career_id);
    let reference = reference_or_today(query.as_of);

    let result = match query.standard.as_deref() {
        Some(standard) => service.standard_status(career, standard, reference),
        None => service.career_status(career, reference),
    };

    match result {
        Ok(status) => (StatusCode::OK, axum::Json(status.to_view())).into_response(),
        Err(ServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "error": "career not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn breakdown_handler<S>(
    State(service): State<Arc<AccreditationService<S>>>,
    Path(career_id): Path<u64>,
    Query(query): Query<AsOfQuery>,
) -> Response
where
    S: PeriodStore + 'static,
{
    let career = CareerId(career_id);
    let reference = reference_or_today(query.as_of);

    match service.career_breakdown(career, reference) {
        Ok(rows) => {
            let view = CareerBreakdownView {
                career,
                reference,
                periods: rows.iter().map(|row| row.to_view()).collect(),
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "error": "career not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn open_period_handler<S>(
    State(service): State<Arc<AccreditationService<S>>>,
    axum::Json(payload): axum::Json<OpenPeriodRequest>,
) -> Response
where
    S: PeriodStore + 'static,
{
    let desired = match (payload.process_start, payload.process_end) {
        (Some(start), Some(end)) => match DateWindow::new(start, end) {
            Ok(window) => Some(window),
            Err(error) => {
                let payload = json!({
                    "error": error.to_string(),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
            }
        },
        (None, None) => None,
        _ => {
            let payload = json!({
                "error": "process_start and process_end must be supplied together",
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    let today = reference_or_today(payload.as_of);
    let career = CareerId(payload.career_id);
    let modality = ModalityId(payload.modality_id);

    match service.find_or_create(career, modality, desired, today) {
        Ok(outcome) => {
            let status = match outcome.action {
                PeriodAction::Created => StatusCode::CREATED,
                PeriodAction::Found => StatusCode::OK,
            };
            (status, axum::Json(outcome.to_view())).into_response()
        }
        Err(error @ ServiceError::WindowConflict { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(ServiceError::InvalidWindow(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "error": "career or modality not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn record_approval_handler<S>(
    State(service): State<Arc<AccreditationService<S>>>,
    Path(period_id): Path<u64>,
    axum::Json(payload): axum::Json<RecordApprovalRequest>,
) -> Response
where
    S: PeriodStore + 'static,
{
    let approval = match DateWindow::new(payload.approval_start, payload.approval_end) {
        Ok(window) => window,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match service.record_approval(PeriodId(period_id), approval) {
        Ok(period) => (StatusCode::OK, axum::Json(period)).into_response(),
        Err(ServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "error": "period not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<AccreditationService<S>>>,
    Query(query): Query<AsOfQuery>,
) -> Response
where
    S: PeriodStore + 'static,
{
    let reference = reference_or_today(query.as_of);

    match service.faculty_report(reference) {
        Ok(report) => (StatusCode::OK, axum::Json(report.summary())).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
