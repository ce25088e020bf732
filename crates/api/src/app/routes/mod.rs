use axum::Router;

pub mod items;
pub mod offers;
pub mod orders;
pub mod system;

/// Router for all engine-backed endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(items::router())
        .merge(offers::router())
        .merge(orders::router())
}
