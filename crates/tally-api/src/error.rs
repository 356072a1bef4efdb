//! HTTP error responses.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    /// Caller input defect; the message is returned as `error`.
    BadRequest(String),
    /// Request body exceeded the configured upload limit.
    PayloadTooLarge(String),
    /// Anything else; the message is returned as `details`.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg) => f.write_str(msg),
        }
    }
}

impl From<tally_core::Error> for ApiError {
    fn from(err: tally_core::Error) -> Self {
        if !err.is_client_error() {
            return ApiError::Internal(err.to_string());
        }
        match err {
            // Caller-facing message without the "Validation error:" prefix
            tally_core::Error::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(format!("Upload too large: {}", err.body_text()))
        } else {
            ApiError::BadRequest(format!("Multipart error: {}", err.body_text()))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) => ErrorResponse {
                error: msg,
                details: None,
            },
            ApiError::Internal(details) => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(details),
            },
        };

        (status, Json(body)).into_response()
    }
}
