use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use orderdesk_core::DomainError;

/// Map a domain error to its HTTP response.
///
/// Management lookups surface `NotFound` (404); order placement surfaces
/// `ItemNotFound` (400), matching the source system's split.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::ItemNotFound(id) => json_error(
            StatusCode::BAD_REQUEST,
            "item_not_found",
            format!("item {id} not found"),
        ),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::InsufficientStock(id) => json_error(
            StatusCode::BAD_REQUEST,
            "insufficient_stock",
            format!("insufficient stock for item {id}"),
        ),
        DomainError::Internal(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
        }
    }
}

/// Body-shape failures (malformed JSON, unrecognized condition variants,
/// wrong-typed fields) are invalid input like any other: 400, not the
/// extractor's default 422.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        rejection.body_text(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
