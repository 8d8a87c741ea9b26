//! Success responses
//!
//! [`Rendered`] serializes a value up front so that a serialization failure
//! still reaches the client as a classified error instead of a bare 500.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::error::ApiError;

/// A 200 response with a JSON body
///
/// # Example
///
/// ```rust
/// use axum::response::IntoResponse;
/// use storefront_api::handlers::Rendered;
/// use storefront_api::resource::Article;
///
/// let response = Rendered(Article::new("Skittles", 1.99)).into_response();
/// assert_eq!(response.status(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct Rendered<T>(pub T);

impl<T: Serialize> Rendered<T> {
    /// Serialize the value, classifying failure as a render failure
    pub fn to_bytes(&self) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(&self.0).map_err(|e| ApiError::render_failure(e.to_string()))
    }
}

impl<T: Serialize> IntoResponse for Rendered<T> {
    fn into_response(self) -> Response {
        match self.to_bytes() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            Err(err) => err.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer;

    struct Unrenderable;

    impl Serialize for Unrenderable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("value cannot be rendered"))
        }
    }

    #[test]
    fn test_success_is_json() {
        let response = Rendered(serde_json::json!({"id": 1})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_serialization_failure_is_422() {
        let err = Rendered(Unrenderable).to_bytes().unwrap_err();
        assert_eq!(err.error_text.as_deref(), Some("value cannot be rendered"));

        let response = Rendered(Unrenderable).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
