//! HTTP API for the model-selection workbench (Axum).
//!
//! Exposes the decision/rollout engine plus the catalog and rollout-history
//! collaborators as JSON endpoints.

pub mod error;
pub mod history;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::catalog_routes())
        .merge(routes::analysis_routes())
        .merge(routes::guidance_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests;
