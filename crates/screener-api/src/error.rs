//! Maps domain `AppError` to HTTP responses.
//!
//! Handlers return [`ApiResult`]; `?` lifts any `AppError` into [`ApiError`].

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use screener_core::error::{AppError, ErrorKind};

/// Message shown to anonymous callers in place of server-side failures.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Result type returned by handlers and extractors.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status and error code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::Deactivated => (StatusCode::FORBIDDEN, "LINK_DEACTIVATED"),
        ErrorKind::Expired => (StatusCode::GONE, "LINK_EXPIRED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Database => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        ErrorKind::Configuration | ErrorKind::Serialization | ErrorKind::Internal => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

/// Hides the details of server-side failures from anonymous callers.
///
/// The full error is logged before being replaced.
pub fn redact(err: AppError) -> AppError {
    if !err.kind.is_server_side() {
        return err;
    }
    tracing::error!(error = %err, source = ?err.source, "Public request failed");
    AppError::new(err.kind, REDACTED_MESSAGE)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(err) = self;
        let (status, error_code) = status_for(err.kind);

        if err.kind.is_server_side() {
            tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
        }

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Validation).0, StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Expired).0, StatusCode::GONE);
        assert_eq!(status_for(ErrorKind::Deactivated).0, StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::Conflict).0, StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::Database).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_redact_hides_server_side_only() {
        let hidden = redact(AppError::database("connection refused by 10.0.0.5"));
        assert_eq!(hidden.kind, ErrorKind::Database);
        assert_eq!(hidden.message, REDACTED_MESSAGE);

        let kept = redact(AppError::expired("Link has expired"));
        assert_eq!(kept.message, "Link has expired");
    }

    #[tokio::test]
    async fn test_api_error_body_shape() {
        let response = ApiError::from(AppError::deactivated("Link has been deactivated"))
            .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "LINK_DEACTIVATED");
        assert_eq!(body.message, "Link has been deactivated");
    }
}
