use crate::infra::{AppState, PopulationHandle};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use enroll_insight::dashboards::enrollment::domain::{ApplicantRecord, DashboardError};
use enroll_insight::dashboards::enrollment::export::{to_csv_string, CSV_FILENAME};
use enroll_insight::dashboards::enrollment::journey::ApplicantJourney;
use enroll_insight::dashboards::enrollment::report::EnrollmentReport;
use enroll_insight::dashboards::enrollment::roster::{find_applicant, query_roster, RosterQuery};
use enroll_insight::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) fn with_dashboard_routes(population: PopulationHandle) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/enrollment/report", post(report_endpoint))
        .route("/api/v1/enrollment/roster", post(roster_endpoint))
        .route("/api/v1/enrollment/journey", post(journey_endpoint))
        .route("/api/v1/enrollment/export", get(export_endpoint))
        .layer(Extension(population))
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

#[derive(Debug, Serialize)]
pub(crate) struct ReportResponse {
    pub(crate) seed: u64,
    #[serde(flatten)]
    pub(crate) report: EnrollmentReport,
}

pub(crate) async fn report_endpoint(
    Extension(population): Extension<PopulationHandle>,
) -> Json<ReportResponse> {
    Json(ReportResponse {
        seed: population.seed(),
        report: EnrollmentReport::from_records(population.records()),
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterResponse {
    pub(crate) total: usize,
    pub(crate) matched: usize,
    pub(crate) records: Vec<ApplicantRecord>,
}

pub(crate) async fn roster_endpoint(
    Extension(population): Extension<PopulationHandle>,
    Json(query): Json<RosterQuery>,
) -> Json<RosterResponse> {
    let records = query_roster(population.records(), &query);
    Json(RosterResponse {
        total: population.records().len(),
        matched: records.len(),
        records,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct JourneyRequest {
    pub(crate) applicant_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct JourneyResponse {
    #[serde(flatten)]
    pub(crate) journey: ApplicantJourney,
    /// Position of the terminal step when it marks a completed enrollment;
    /// rendering layers highlight that step.
    pub(crate) enrolled_completion: Option<usize>,
}

pub(crate) async fn journey_endpoint(
    Extension(population): Extension<PopulationHandle>,
    Json(request): Json<JourneyRequest>,
) -> Result<Json<JourneyResponse>, AppError> {
    let record = find_applicant(population.records(), &request.applicant_id)
        .ok_or_else(|| DashboardError::ApplicantNotFound(request.applicant_id.clone()))?;

    let journey = ApplicantJourney::reconstruct(record);
    let enrolled_completion = journey.enrolled_completion();
    Ok(Json(JourneyResponse {
        journey,
        enrolled_completion,
    }))
}

pub(crate) async fn export_endpoint(
    Extension(population): Extension<PopulationHandle>,
) -> Result<impl IntoResponse, AppError> {
    let body = to_csv_string(population.records())?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        body,
    ))
}
