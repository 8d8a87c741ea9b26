//! Collection handlers
//!
//! One set of handlers serves every [`Resource`]; the router instantiates them
//! per collection. The pipeline stages have already run by the time a handler
//! body starts, so the handlers only call the store and render.

use axum::extract::State;

use super::body::JsonBody;
use super::error::ApiError;
use super::response::Rendered;
use crate::middleware::Loaded;
use crate::repository::{paginate, upsert, Backend, PageCursor, ResourceList};
use crate::resource::Resource;

/// `GET /{collection}?page_id=`
pub async fn list<R: Resource>(
    State(store): State<Backend<R>>,
    cursor: PageCursor,
) -> Result<Rendered<ResourceList<R>>, ApiError> {
    let page = paginate(&store, cursor)
        .await
        .map_err(ApiError::from_list)?;
    Ok(Rendered(page))
}

/// `GET /{collection}/{id}`
pub async fn get_one<R: Resource>(Loaded(record): Loaded<R>) -> Rendered<R> {
    Rendered(record)
}

/// `PUT /{collection}`
///
/// Creates the record when its id is missing or 0, otherwise updates the
/// stored one. Answers with the stored record.
pub async fn put<R: Resource>(
    State(store): State<Backend<R>>,
    JsonBody(mut record): JsonBody<R>,
) -> Result<Rendered<R>, ApiError> {
    upsert(&store, &mut record)
        .await
        .map_err(ApiError::from_upsert)?;
    Ok(Rendered(record))
}

/// Answer for unknown routes
pub async fn fallback() -> ApiError {
    ApiError::not_found()
}
