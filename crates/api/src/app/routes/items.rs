use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use orderdesk_core::Upserted;

use crate::app::{dto, errors, state::AppState};

pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items))
        .route("/items-management", post(upsert_item))
        .route("/items-management/:id", delete(remove_item))
}

pub async fn list_items(Extension(state): Extension<AppState>) -> axum::response::Response {
    let engine = state.engine();
    (StatusCode::OK, Json(engine.catalog().list().to_vec())).into_response()
}

pub async fn upsert_item(
    Extension(state): Extension<AppState>,
    body: Result<Json<dto::UpsertItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "item upsert rejected");
            return errors::json_rejection_to_response(rejection);
        }
    };
    if let Err(e) = body.validate() {
        tracing::warn!(error = %e, "item upsert rejected");
        return errors::domain_error_to_response(e);
    }

    let mut engine = state.engine();
    match engine
        .catalog_mut()
        .upsert(body.id, body.name, body.price, body.stock)
    {
        Upserted::Created(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Upserted::Updated(item) => (StatusCode::OK, Json(item)).into_response(),
    }
}

pub async fn remove_item(
    Extension(state): Extension<AppState>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    let mut engine = state.engine();
    match engine.catalog_mut().remove(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::warn!(item_id = id, error = %e, "item removal rejected");
            errors::domain_error_to_response(e)
        }
    }
}
