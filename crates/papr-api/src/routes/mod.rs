//! API route handlers

pub mod health;
pub mod loans;
pub mod risk;
pub mod vaults;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/vaults", vaults::router())
        .route("/risk", post(risk::assess))
        .nest("/loans", loans::router())
        .with_state(state)
}
