//! HTTP API application wiring (Axum router + engine state).
//!
//! Layout:
//! - `state.rs`: shared engine handle behind a process-wide mutex
//! - `routes/`: HTTP routes + handlers (one file per surface area)
//! - `dto.rs`: request DTOs and field validation
//! - `errors.rs`: consistent error responses

use axum::{routing::get, Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state))
}
