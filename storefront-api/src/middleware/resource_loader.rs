//! Resource loader stage
//!
//! Resolves the `{id}` path segment to a stored record before the handler
//! runs:
//!
//! - no id: 404, same as an id nothing is stored under
//! - id that is not an integer: 400 carrying the parse error
//! - lookup finds nothing: 404
//! - lookup finds the record: handed to the handler as [`Loaded`]

use axum::extract::{FromRef, FromRequestParts, RawPathParams};
use axum::http::request::Parts;

use crate::handlers::ApiError;
use crate::repository::{Backend, Store};
use crate::resource::Resource;

/// Name of the path parameter carrying the id
pub const ID_PARAM: &str = "id";

/// A record resolved from the request path
#[derive(Debug, Clone)]
pub struct Loaded<R>(pub R);

/// Look up the record a raw path id refers to
pub async fn resolve_resource<R, S>(store: &S, raw_id: Option<&str>) -> Result<R, ApiError>
where
    R: Resource,
    S: Store<R>,
{
    let Some(raw_id) = raw_id else {
        return Err(ApiError::not_found());
    };

    let id: i64 = raw_id.parse().map_err(|e| {
        ApiError::invalid_request(format!("couldn't read {} {:?}: {}", ID_PARAM, raw_id, e))
    })?;

    match store.get_by_id(id).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(ApiError::not_found()),
        Err(err) => {
            tracing::warn!(kind = R::KIND, id, error = %err, "Lookup failed, answering not found");
            Err(ApiError::not_found())
        }
    }
}

impl<R, S> FromRequestParts<S> for Loaded<R>
where
    R: Resource,
    Backend<R>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = RawPathParams::from_request_parts(parts, state).await.ok();
        let raw_id = params
            .as_ref()
            .and_then(|params| params.iter().find(|(key, _)| *key == ID_PARAM))
            .map(|(_, value)| value);

        let store = Backend::<R>::from_ref(state);
        resolve_resource(&store, raw_id).await.map(Loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiErrorKind;
    use crate::repository::MemoryStore;
    use crate::resource::Article;

    async fn store_with_skittles() -> MemoryStore<Article> {
        let store = MemoryStore::new();
        store.insert(&Article::new("Skittles", 1.99)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_found() {
        let store = store_with_skittles().await;
        let article = resolve_resource(&store, Some("1")).await.unwrap();
        assert_eq!(article.name, "Skittles");
    }

    #[tokio::test]
    async fn test_missing_row_is_not_found() {
        let store = store_with_skittles().await;
        let err = resolve_resource::<Article, _>(&store, Some("2")).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.error_text, None);
    }

    #[tokio::test]
    async fn test_absent_id_is_not_found() {
        let store = store_with_skittles().await;
        let err = resolve_resource::<Article, _>(&store, None).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_id_is_invalid_request() {
        let store = store_with_skittles().await;
        let err = resolve_resource::<Article, _>(&store, Some("one")).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidRequest);
        assert!(err.error_text.unwrap().contains("invalid digit"));
    }
}
