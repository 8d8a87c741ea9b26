//! Page cursor stage
//!
//! Reads the first `page_id` from the query string. Absent or empty means
//! cursor 0, a number becomes the cursor, anything else ends the request
//! with 400. The value is taken verbatim, so padded numbers are rejected.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::handlers::ApiError;
use crate::repository::PageCursor;

/// Name of the query parameter carrying the cursor
pub const PAGE_ID_PARAM: &str = "page_id";

/// Turn the raw `page_id` value into a cursor
pub fn parse_page_cursor(raw: Option<&str>) -> Result<PageCursor, ApiError> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Ok(PageCursor::default());
    };

    raw.parse::<i64>().map(PageCursor::new).map_err(|e| {
        tracing::debug!(page_id = raw, "Unreadable page cursor");
        ApiError::invalid_request(format!("couldn't read {PAGE_ID_PARAM}: {e}"))
    })
}

impl<S> FromRequestParts<S> for PageCursor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| ApiError::invalid_request(e.body_text()))?;
        let raw = pairs
            .iter()
            .find(|(name, _)| name == PAGE_ID_PARAM)
            .map(|(_, value)| value.as_str());
        parse_page_cursor(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiErrorKind;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<PageCursor, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        PageCursor::from_request_parts(&mut parts, &()).await
    }

    #[test]
    fn test_absent_cursor_defaults_to_zero() {
        assert_eq!(parse_page_cursor(None).unwrap(), PageCursor::default());
        assert_eq!(parse_page_cursor(Some("")).unwrap().get(), 0);
    }

    #[test]
    fn test_numeric_cursor() {
        assert_eq!(parse_page_cursor(Some("11")).unwrap().get(), 11);
        assert_eq!(parse_page_cursor(Some("-3")).unwrap().get(), 0);
    }

    #[test]
    fn test_non_numeric_cursor_is_rejected() {
        let err = parse_page_cursor(Some("eleven")).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidRequest);
        assert_eq!(
            err.error_text.as_deref(),
            Some("couldn't read page_id: invalid digit found in string")
        );
        assert!(parse_page_cursor(Some("1.5")).is_err());
    }

    #[test]
    fn test_whitespace_cursor_is_rejected() {
        assert!(parse_page_cursor(Some("  ")).is_err());
        assert!(parse_page_cursor(Some(" 5")).is_err());
        assert!(parse_page_cursor(Some("5 ")).is_err());
    }

    #[tokio::test]
    async fn test_extract_from_query_string() {
        assert_eq!(extract("/articles").await.unwrap().get(), 0);
        assert_eq!(extract("/articles?page_id=11").await.unwrap().get(), 11);
        assert_eq!(extract("/articles?page_id=").await.unwrap().get(), 0);
        assert_eq!(extract("/articles?other=1&page_id=4").await.unwrap().get(), 4);
    }

    #[tokio::test]
    async fn test_extract_rejects_garbage() {
        let err = extract("/articles?page_id=abc").await.unwrap_err();
        assert_eq!(err.kind.status_code(), axum::http::StatusCode::BAD_REQUEST);

        let err = extract("/articles?page_id=%20%20").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidRequest);
        assert!(extract("/articles?page_id=%205").await.is_err());
    }

    #[tokio::test]
    async fn test_repeated_cursor_uses_first_value() {
        assert_eq!(extract("/articles?page_id=3&page_id=4").await.unwrap().get(), 3);
        assert_eq!(extract("/articles?page_id=3&page_id=x").await.unwrap().get(), 3);
    }
}
