use crate::utils::error::{ErrorCategory, GatewayError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Fixed `error` text of every 500 response; the cause goes in `details`.
pub const GENERATION_FAILED: &str = "Website generation failed. Check server logs.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn input(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            details: None,
        }
    }

    pub fn generation_failed(details: impl Into<String>) -> Self {
        Self {
            error: GENERATION_FAILED.to_string(),
            details: Some(details.into()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = match self.category() {
            ErrorCategory::Input => ErrorBody::input(self.to_string()),
            _ => ErrorBody::generation_failed(self.to_string()),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[must_use]
pub fn rejection_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::input(message))).into_response()
}
