use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::{dto, errors, state::AppState};

pub fn router() -> Router {
    Router::new().route("/orders", post(place_order).get(list_orders))
}

pub async fn place_order(
    Extension(state): Extension<AppState>,
    body: Result<Json<dto::PlaceOrderRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "order rejected");
            return errors::json_rejection_to_response(rejection);
        }
    };
    let mut engine = state.engine();
    match engine.place_order(body.items) {
        Ok(order) => {
            tracing::info!(order_id = order.id, total = %order.total, "order placed");
            (StatusCode::CREATED, Json(order)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "order rejected");
            errors::domain_error_to_response(e)
        }
    }
}

pub async fn list_orders(Extension(state): Extension<AppState>) -> axum::response::Response {
    let engine = state.engine();
    (StatusCode::OK, Json(engine.orders().list().to_vec())).into_response()
}
