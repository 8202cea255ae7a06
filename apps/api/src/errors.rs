use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// HTTP-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// A failed pipeline run is NOT an `AppError`: it is reported inside a 200
/// `ApplicationResult`. Only request-level problems surface here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Failure kinds of the application pipeline.
///
/// Every phase either succeeds fully or fails with exactly one of these.
/// Messages are user-facing: the presentation layer shows them verbatim.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Could not find a required file: {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("Could not read input file {}: {reason}", .path.display())]
    InvalidInputFile { path: PathBuf, reason: String },

    #[error("URL is not from a supported job site: {0}")]
    UnsupportedSource(String),

    #[error("Could not load {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    #[error("Job posting is missing its {0}")]
    ExtractionFailure(String),

    #[error("Company summary could not be generated: {0}")]
    SummarizationFailure(String),

    #[error("Could not tailor {target}: {reason}")]
    TailoringFailure { target: String, reason: String },

    #[error("Could not write {}: {reason}", .path.display())]
    ArtifactWriteFailure { path: PathBuf, reason: String },

    #[error("Could not append to tracking log {}: {reason}", .path.display())]
    LoggingFailure { path: PathBuf, reason: String },

    #[error("Unexpected error: {0}")]
    UnexpectedFailure(String),
}

impl PipelineError {
    /// Stable machine-readable label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingInputFile(_) => "MissingInputFile",
            PipelineError::InvalidInputFile { .. } => "InvalidInputFile",
            PipelineError::UnsupportedSource(_) => "UnsupportedSource",
            PipelineError::FetchFailure { .. } => "FetchFailure",
            PipelineError::ExtractionFailure(_) => "ExtractionFailure",
            PipelineError::SummarizationFailure(_) => "SummarizationFailure",
            PipelineError::TailoringFailure { .. } => "TailoringFailure",
            PipelineError::ArtifactWriteFailure { .. } => "ArtifactWriteFailure",
            PipelineError::LoggingFailure { .. } => "LoggingFailure",
            PipelineError::UnexpectedFailure(_) => "UnexpectedFailure",
        }
    }
}
