//! Axum HTTP routes for the assessment frontend and admin dashboard.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/submit` | Score, classify and store one submission |
//! | GET | `/api/admin/students` | Every stored record |
//! | POST | `/api/admin/login` | Check the admin secret |
//! | GET | `/api/admin/export-csv` | All records as a CSV download |
//! | GET | `/api/admin/summary` | Cohort counts and mean scores |
//! | GET | `/api/report/{student_id}` | One student's PDF report |

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pathway_core::statistics::CohortSummary;
use pathway_core::{AssessmentRecord, Assessor, SubmissionOutcome, SubmissionRequest};
use pathway_report::{csv, pdf, Branding};

use crate::auth::AdminGate;
use crate::error::ApiError;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub assessor: Arc<Assessor>,
    pub gate: Arc<AdminGate>,
    pub branding: Arc<Branding>,
}

impl AppState {
    pub fn new(assessor: Assessor, gate: AdminGate, branding: Branding) -> Self {
        Self {
            assessor: Arc::new(assessor),
            gate: Arc::new(gate),
            branding: Arc::new(branding),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/api/submit", post(handle_submit))
        .route("/api/admin/students", get(handle_list_students))
        .route("/api/admin/login", post(handle_admin_login))
        .route("/api/admin/export-csv", get(handle_export_csv))
        .route("/api/admin/summary", get(handle_summary))
        .route("/api/report/{student_id}", get(handle_report))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize)]
struct LoginRequest {
    password: String,
}

fn attachment(content_type: &str, filename: &str, body: impl IntoResponse) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        body,
    )
        .into_response()
}

// ── Handlers ────────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_submit(
    State(state): State<AppState>,
    body: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Json<SubmissionOutcome>, ApiError> {
    let Json(request) = body?;
    let outcome = state.assessor.submit_request(request).await?;
    Ok(Json(outcome))
}

async fn handle_list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssessmentRecord>>, ApiError> {
    Ok(Json(state.assessor.records().await?))
}

async fn handle_admin_login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(login) = body?;
    state.gate.verify(&login.password)?;
    tracing::info!("admin login accepted");
    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Logged in successfully",
    })))
}

async fn handle_export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let records = state.assessor.records().await?;
    let body = csv::render_csv(&records)?;
    tracing::info!(rows = records.len(), "exported records as csv");
    Ok(attachment("text/csv", &state.branding.export_filename, body))
}

async fn handle_summary(State(state): State<AppState>) -> Result<Json<CohortSummary>, ApiError> {
    let records = state.assessor.records().await?;
    Ok(Json(CohortSummary::from_records(&records)))
}

async fn handle_report(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(student_id) = path?;
    let record = state.assessor.record(student_id).await?;
    let body = pdf::render_report(&record, &state.branding);
    let filename = state.branding.report_filename(&record.identity.name);
    tracing::info!(id = record.id, bytes = body.len(), "rendered report");
    Ok(attachment("application/pdf", &filename, body))
}
