//! Axum route handlers for the Applications API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::pipeline::ApplicationResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub job_url: String,
    #[serde(default)]
    pub company_url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
///
/// Runs the full pipeline for one posting. A failed run is still a 200: the
/// `ApplicationResult` carries `success: false` and the message to show.
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Json<ApplicationResult>, AppError> {
    if request.job_url.trim().is_empty() || request.company_url.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide both URLs before generating.".to_string(),
        ));
    }

    let _guard = state.run_lock.try_lock().map_err(|_| {
        AppError::Conflict("An application run is already in progress".to_string())
    })?;

    info!("Application requested for {}", request.job_url);
    let outcome = state
        .orchestrator
        .run(request.job_url.trim(), Some(request.company_url.trim()))
        .await;

    Ok(Json(ApplicationResult::from(outcome)))
}
