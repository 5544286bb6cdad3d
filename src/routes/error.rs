//! Mapping from application errors to HTTP responses.
//!
//! Client mistakes caught before the model is called are 4xx; everything
//! else is a 500 whose detail carries the underlying cause.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::models::ErrorBody;
use crate::types::AppError;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFormat(_)
            | AppError::EmptyMessage
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::EmptySummary
            | AppError::Extraction(_)
            | AppError::Decoding(_)
            | AppError::Inference(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(status = %status, error = %detail, "Request failed");
        } else {
            warn!(status = %status, error = %detail, "Request rejected");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}
