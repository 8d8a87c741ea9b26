//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    repository::{Backend, Store},
    resource::{Article, Order, Resource},
    state::AppState,
};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with one entry per store
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Store statuses, keyed by collection
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Backend serving the collection
    pub backend: String,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe, 200 whenever the process serves requests
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe: pings every store, 503 when one fails
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let (articles, orders) = tokio::join!(check(state.articles()), check(state.orders()));

    let ready = articles.healthy && orders.healthy;
    let dependencies = HashMap::from([
        (Article::COLLECTION.to_string(), articles),
        (Order::COLLECTION.to_string(), orders),
    ]);

    let response = ReadinessResponse {
        ready,
        service: state.config().service.name.clone(),
        dependencies,
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

async fn check<R: Resource>(store: &Backend<R>) -> DependencyStatus {
    match store.ping().await {
        Ok(()) => DependencyStatus {
            healthy: true,
            backend: store.name().to_string(),
            message: Some("Connected".to_string()),
        },
        Err(e) => {
            tracing::error!(collection = R::COLLECTION, "Store health check failed: {}", e);
            DependencyStatus {
                healthy: false,
                backend: store.name().to_string(),
                message: Some(format!("Connection failed: {}", e.message)),
            }
        }
    }
}
