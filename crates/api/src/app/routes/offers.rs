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
        .route("/offers", get(list_offers))
        .route("/offers-management", post(upsert_offer))
        .route("/offers-management/:id", delete(remove_offer))
}

pub async fn list_offers(Extension(state): Extension<AppState>) -> axum::response::Response {
    let engine = state.engine();
    (StatusCode::OK, Json(engine.offers().list().to_vec())).into_response()
}

pub async fn upsert_offer(
    Extension(state): Extension<AppState>,
    body: Result<Json<dto::UpsertOfferRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "offer upsert rejected");
            return errors::json_rejection_to_response(rejection);
        }
    };
    if let Err(e) = body.validate() {
        tracing::warn!(error = %e, "offer upsert rejected");
        return errors::domain_error_to_response(e);
    }

    let mut engine = state.engine();
    match engine
        .offers_mut()
        .upsert(body.id, body.name, body.condition, body.discount)
    {
        Upserted::Created(offer) => (StatusCode::CREATED, Json(offer)).into_response(),
        Upserted::Updated(offer) => (StatusCode::OK, Json(offer)).into_response(),
    }
}

pub async fn remove_offer(
    Extension(state): Extension<AppState>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    let mut engine = state.engine();
    match engine.offers_mut().remove(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::warn!(offer_id = id, error = %e, "offer removal rejected");
            errors::domain_error_to_response(e)
        }
    }
}
