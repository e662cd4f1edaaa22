//! HTTP error responses

use crate::error::{Error, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// An error rendered as `{"error": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Log `err` and answer with the generic `message` only
    pub fn internal(message: &'static str, err: impl fmt::Display) -> Self {
        tracing::error!("{}: {}", message, err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn from_store(err: StoreError, message: &'static str) -> Self {
        match err {
            StoreError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            StoreError::UnknownSkill(_) => Self::bad_request(err.to_string()),
            other => Self::internal(message, other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Convert library errors into API errors, using `message` for 500s
pub trait ResultExt<T> {
    fn or_api(self, message: &'static str) -> ApiResult<T>;
}

impl<T> ResultExt<T> for Result<T, StoreError> {
    fn or_api(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|err| ApiError::from_store(err, message))
    }
}

impl<T> ResultExt<T> for Result<T, Error> {
    fn or_api(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|err| match err {
            Error::InvalidQuery { .. } | Error::Validation(_) => ApiError::bad_request(err.to_string()),
            Error::SourceUnavailable(source) => ApiError::internal(message, source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_status() {
        let conflict = Err::<(), _>(StoreError::Conflict("Skill already exists".to_string())).or_api("x");
        assert_eq!(conflict.unwrap_err().status, StatusCode::CONFLICT);

        let unknown = Err::<(), _>(StoreError::UnknownSkill(9)).or_api("x");
        let unknown = unknown.unwrap_err();
        assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
        assert_eq!(unknown.message, "Unknown skill id: 9");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = Err::<(), _>(Error::SourceUnavailable(StoreError::Poisoned)).or_api("Failed to perform search");
        let err = err.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to perform search");
    }

    #[test]
    fn test_invalid_query_is_client_error() {
        let err = Err::<(), _>(Error::InvalidQuery { min: 2 }).or_api("Failed to perform search");
        let err = err.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Search query must be at least 2 characters long");
    }
}
