//! Route table

use axum::{extract::FromRef, routing::get, Router};

use crate::{
    handlers::{fallback, get_one, list, put},
    health::{health, readiness},
    repository::Backend,
    resource::{Article, Order, Resource},
    state::AppState,
};

/// All routes of the service, bound to `state`
///
/// | Method | Path | |
/// |---|---|---|
/// | GET | `/{collection}?page_id=` | one page of the collection |
/// | GET | `/{collection}/{id}` | one record |
/// | PUT | `/{collection}` | create or update a record |
/// | GET | `/health`, `/ready` | probes |
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(collection::<Article>())
        .merge(collection::<Order>())
        .route("/health", get(health))
        .route("/ready", get(readiness))
        .fallback(fallback)
        .with_state(state)
}

fn collection<R>() -> Router<AppState>
where
    R: Resource,
    Backend<R>: FromRef<AppState>,
{
    Router::new()
        .route(
            &format!("/{}", R::COLLECTION),
            get(list::<R>).put(put::<R>),
        )
        .route(&format!("/{}/{{id}}", R::COLLECTION), get(get_one::<R>))
}
