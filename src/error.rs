use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Reasons a dataset file could not become a track table.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: tempo '{value}' is not a number")]
    InvalidTempo { row: usize, value: String },
}

/// Failures surfaced to API callers as `{"error": ...}` with a status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No heart rate data received")]
    MissingHeartRate,
    #[error("Heart rate must be a number")]
    InvalidHeartRate,
    #[error("No BPM range provided")]
    MissingBpmRange,
    #[error("BPM range must be a pair of numbers [min, max]")]
    InvalidBpmRange,
    #[error("BPM range minimum {min} exceeds maximum {max}")]
    InvertedBpmRange { min: f64, max: f64 },
    #[error("Dataset not loaded")]
    DatasetUnavailable,
    #[error("Dataset reload failed: {0}")]
    ReloadFailed(#[from] DatasetError),
    #[error("Dataset reload failed: {0}")]
    ReloadAborted(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingHeartRate
            | ApiError::InvalidHeartRate
            | ApiError::MissingBpmRange
            | ApiError::InvalidBpmRange
            | ApiError::InvertedBpmRange { .. } => StatusCode::BAD_REQUEST,
            ApiError::DatasetUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::ReloadFailed(_) | ApiError::ReloadAborted(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
