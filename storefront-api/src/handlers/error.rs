//! API error types for handler operations
//!
//! Every failure on the request path ends up as one of three kinds, each with
//! a fixed HTTP status and status text. The body is an [`ErrorEnvelope`]; the
//! status code itself is never serialized.
//!
//! # Example
//!
//! ```rust
//! use axum::http::StatusCode;
//! use storefront_api::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::invalid_request("couldn't read page_id: invalid digit found in string");
//! assert_eq!(error.kind, ApiErrorKind::InvalidRequest);
//! assert_eq!(error.kind.status_code(), StatusCode::BAD_REQUEST);
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::StoreError;

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Malformed path, query or body, or a write rejected because of its data
    InvalidRequest,
    /// No resource has the requested id
    NotFound,
    /// The success value could not be serialized
    RenderFailure,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::RenderFailure => write!(f, "render_failure"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::RenderFailure => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// User-level status message
    #[must_use]
    pub const fn status_text(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request.",
            Self::NotFound => "Resource not found.",
            Self::RenderFailure => "Error rendering response.",
        }
    }
}

/// Error body sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// User-level status message
    pub status_text: String,
    /// Application-specific error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_code: Option<i64>,
    /// Application-level error message, for debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
}

/// A classified request failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The category of error
    pub kind: ApiErrorKind,
    /// Detail shown to the client, never set for [`ApiErrorKind::NotFound`]
    pub error_text: Option<String>,
    /// Application-specific code
    pub app_code: Option<i64>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, error_text: Option<String>) -> Self {
        Self {
            kind,
            error_text,
            app_code: None,
        }
    }

    /// Malformed input or a write the store refused because of its data
    pub fn invalid_request(error_text: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidRequest, Some(error_text.into()))
    }

    /// The resource does not exist
    pub fn not_found() -> Self {
        Self::new(ApiErrorKind::NotFound, None)
    }

    /// The response could not be produced
    pub fn render_failure(error_text: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::RenderFailure, Some(error_text.into()))
    }

    /// Attach an application-specific code
    #[must_use]
    pub fn with_app_code(mut self, code: i64) -> Self {
        self.app_code = Some(code);
        self
    }

    /// Classify a failed upsert
    ///
    /// Upsert failures are always reported as invalid requests. Store faults
    /// that are not the caller's doing are logged and their detail withheld.
    pub fn from_upsert(err: StoreError) -> Self {
        if err.is_client_error() {
            return Self::invalid_request(err.message);
        }
        tracing::error!(
            operation = %err.operation,
            kind = %err.kind,
            retriable = err.is_retriable(),
            "Upsert failed: {}", err.message
        );
        Self::invalid_request("the record could not be stored")
    }

    /// Classify a failed list query
    pub fn from_list(err: StoreError) -> Self {
        tracing::error!(
            operation = %err.operation,
            kind = %err.kind,
            retriable = err.is_retriable(),
            "Listing failed: {}", err.message
        );
        Self::render_failure("the list could not be loaded")
    }

    /// The body this error renders to
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            status_text: self.kind.status_text().to_string(),
            app_code: self.app_code,
            error_text: match self.kind {
                ApiErrorKind::NotFound => None,
                _ => self.error_text.clone(),
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {} error", self.kind)?;
        if let Some(text) = &self.error_text {
            write!(f, ": {}", text)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        match self.kind {
            ApiErrorKind::NotFound => tracing::debug!(kind = %self.kind, "Resource not found"),
            _ => tracing::warn!(
                kind = %self.kind,
                status = status.as_u16(),
                error_text = ?self.error_text,
                "Request failed"
            ),
        }

        (status, Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{StoreErrorKind, StoreOperation};

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiErrorKind::InvalidRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiErrorKind::RenderFailure.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ApiError::invalid_request("bad id").envelope()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status_text": "Invalid request.", "error_text": "bad id"})
        );

        let json = serde_json::to_value(ApiError::not_found().with_app_code(404).envelope()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status_text": "Resource not found.", "app_code": 404})
        );
    }

    #[test]
    fn test_not_found_never_carries_detail() {
        let mut error = ApiError::not_found();
        error.error_text = Some("row 7 missing from articles".to_string());
        assert_eq!(error.envelope().error_text, None);
    }

    #[test]
    fn test_upsert_client_error_keeps_message() {
        let error = ApiError::from_upsert(StoreError::not_found("article", 9));
        assert_eq!(error.kind, ApiErrorKind::InvalidRequest);
        assert_eq!(error.error_text.as_deref(), Some("article 9 does not exist"));
    }

    #[test]
    fn test_upsert_store_fault_hides_detail() {
        let fault = StoreError::new(
            StoreOperation::Insert,
            StoreErrorKind::DatabaseError,
            "relation \"articles\" does not exist",
        );
        let error = ApiError::from_upsert(fault);
        assert_eq!(error.kind, ApiErrorKind::InvalidRequest);
        assert!(!error.error_text.unwrap().contains("relation"));
    }

    #[test]
    fn test_list_failure_is_render_failure() {
        let error = ApiError::from_list(StoreError::connection_failed("refused"));
        assert_eq!(error.kind, ApiErrorKind::RenderFailure);
        assert_eq!(error.envelope().status_text, "Error rendering response.");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::render_failure("boom").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
