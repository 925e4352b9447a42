//! JSON response envelope and error-to-status mapping.
//!
//! Every response body has the shape `{ "success": bool, "message"?: string, "data"?: .. }`.
//! Storage failures are logged in full here and reported to clients with a
//! generic message only.

use crate::errors::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

/// The uniform response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request succeeded
    pub success: bool,
    /// Human-readable outcome, mainly for errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload for successful reads and writes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// A successful response carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    /// A failed response carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// HTTP status used for each error variant.
#[must_use]
pub const fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::Validation { .. } | Error::BusinessRule { .. } => StatusCode::BAD_REQUEST,
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::Database(_) | Error::Config { .. } | Error::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = error_status(&self);
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed with internal error");
            "Internal server error".to_string()
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
            self.to_string()
        };
        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use sea_orm::DbErr;
    use serde_json::json;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&Error::validation("key", "key is required")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&Error::BusinessRule {
                message: "blocked".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&Error::not_found("Exam paper", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&Error::Database(DbErr::Custom("socket closed".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_skips_absent_fields() {
        let body = serde_json::to_value(ApiResponse::message("Content saved")).unwrap();
        assert_eq!(body, json!({"success": true, "message": "Content saved"}));

        let body = serde_json::to_value(ApiResponse::data(vec![1, 2])).unwrap();
        assert_eq!(body, json!({"success": true, "data": [1, 2]}));
    }
}
