//! API error envelope
//!
//! Every client-facing failure is rendered as
//! `{"error": true, "status": <code>, "message": <text>}` with the same
//! HTTP status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use gitcord::DomainError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn invalid_token() -> Self {
        Self::bad_request("Handler token was in an invalid format")
    }

    pub fn malformed_body() -> Self {
        Self::bad_request("The request body was malformed")
    }

    pub fn handler_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "A handler could not be found with the token provided".to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        tracing::error!("domain error: {e}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": true,
            "status": self.status.as_u16(),
            "message": self.message,
        });

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let err = ApiError::handler_not_found();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(
            err.message,
            "A handler could not be found with the token provided"
        );
    }

    #[test]
    fn test_domain_errors_are_not_leaked() {
        let err = ApiError::from(DomainError::Repository("connection refused".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal Server Error");
    }
}
