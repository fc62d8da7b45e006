//! JSON response envelope shared by every route.
//!
//! Success bodies are `{"success": true, "data": ...}`; failures are
//! `{"success": false, "error": "..."}`. Database and internal errors are
//! logged here and surfaced as a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use konak_shared::AppError;

/// Wraps data in the success envelope with the given status.
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(json!({ "success": true, "data": data }))).into_response()
}

/// Wraps data in a 200 success envelope.
pub fn ok<T: Serialize>(data: T) -> Response {
    success(StatusCode::OK, data)
}

/// Wraps data in a 201 success envelope.
pub fn created<T: Serialize>(data: T) -> Response {
    success(StatusCode::CREATED, data)
}

/// Converts an application error into the failure envelope.
pub fn failure(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    // Never leak storage details to the caller.
    let message = match err {
        AppError::Database(detail) | AppError::Internal(detail) => {
            error!(code = err.error_code(), detail = %detail, "Internal error");
            "An internal error occurred".to_string()
        }
        other => other.to_string(),
    };

    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::{AppError, StatusCode, failure, ok};

    #[test]
    fn validation_failures_map_to_bad_request() {
        let resp = failure(&AppError::Validation("amount must be positive".into()));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_failures_map_to_internal_server_error() {
        let resp = failure(&AppError::Database("connection reset".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn ok_wraps_with_200() {
        let resp = ok(serde_json::json!({"id": 1}));
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
