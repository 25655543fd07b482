//! API error responses.
//!
//! Every error path renders as `{"error": "<message>"}` with an appropriate
//! status. Messages stay generic; upstream failure details go to logs only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request is missing required fields or carries unusable values.
    /// Rejected before any network call is attempted.
    #[error("{0}")]
    MalformedRequest(String),

    /// The claimed transaction failed validation, or the ledger lookup
    /// itself failed. The two are logged distinctly but answered alike.
    #[error("Invalid transaction")]
    InvalidTransaction,

    /// The whitelist service call failed after validation passed.
    #[error("Whitelist service error")]
    Upstream,

    /// Unclassified internal failure.
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidTransaction => StatusCode::BAD_REQUEST,
            ApiError::Upstream => StatusCode::BAD_GATEWAY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}
