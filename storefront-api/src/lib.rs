//! # storefront-api
//!
//! HTTP API serving the `articles` and `orders` collections of a small shop.
//!
//! ## Features
//!
//! - **Cursor pagination**: pages of ten, `next_page_id` from a lookahead row
//! - **Upsert**: `PUT` creates a record without id and updates one with an id
//! - **Typed errors**: every failure answers 400, 404 or 422 with a JSON envelope
//! - **Backends**: PostgreSQL when configured, in-memory otherwise
//! - **Middleware stack**: request ids, tracing, timeouts, body limits, CORS, panic recovery
//! - **Graceful shutdown**: SIGTERM and SIGINT drain in-flight requests
//!
//! ## Example
//!
//! ```rust,no_run
//! use storefront_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config);
//!
//!     let state = AppState::connect(config.clone()).await?;
//!
//!     Server::new(config).serve(router(state)).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod observability;
pub mod repository;
pub mod resource;
pub mod routes;
pub mod server;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, MiddlewareConfig, ServiceConfig};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, ApiErrorKind, ErrorEnvelope, JsonBody, Rendered};
    pub use crate::health::{health, readiness};
    pub use crate::ids::{MakeTypedRequestId, RequestId};
    pub use crate::middleware::Loaded;
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        paginate, upsert, Backend, MemoryStore, PageCursor, PgStore, ResourceList, Store,
        StoreError, StoreErrorKind, StoreResult, PAGE_SIZE,
    };
    pub use crate::resource::{Article, Order, Resource};
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;

    pub use axum::{
        extract::State,
        routing::{get, put},
        Json, Router,
    };
}
