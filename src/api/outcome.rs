use crate::api::schemas::notices::ValidationErrorResponse;
use crate::domain::outcome::Outcome;
use crate::error::AppError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Renders an operation outcome, using `on_ok` to shape the success payload.
///
/// Ok → whatever `on_ok` returns, `NotFound` → 404, `BadRequest` → 400 with the
/// violation list, `NoContent` → 204.
pub fn render<T, R, F>(outcome: Outcome<T>, on_ok: F) -> Response
where
    F: FnOnce(T) -> R,
    R: IntoResponse,
{
    match outcome {
        Outcome::Ok(value) => on_ok(value).into_response(),
        Outcome::NotFound => AppError::NotFound.into_response(),
        Outcome::BadRequest(violations) => {
            tracing::debug!(violations = violations.len(), "Validation failed");
            (StatusCode::BAD_REQUEST, Json(ValidationErrorResponse::from(violations))).into_response()
        }
        Outcome::NoContent => StatusCode::NO_CONTENT.into_response(),
    }
}
