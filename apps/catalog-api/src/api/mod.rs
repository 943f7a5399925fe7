//! API routes module

pub mod categories;
pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// API routes without the `/api` prefix, which `create_router` adds.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/categories", categories::router(state))
}

/// `GET /ready` with a live database check. Merged next to `/health`.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
