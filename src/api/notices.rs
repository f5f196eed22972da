use crate::api::AppState;
use crate::api::outcome::render;
use crate::api::schemas::notices::{CreateNoticeRequest, NoticeResponse, UpdateNoticeRequest};
use crate::domain::request::{DeleteNoticeCommand, GetNoticeQuery, UpdateNoticeCommand};
use crate::error::{AppError, Result};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Lists all active notices.
///
/// An empty list is answered with 204 unless `empty_list_no_content` is disabled.
///
/// # Errors
/// Returns `AppError::Database` if the store fails.
pub async fn list_notices(State(state): State<AppState>) -> Result<Response> {
    let cancel = state.shutdown.child_token();
    let outcome = state.notice_service.list(&cancel).await?;
    let empty_as_no_content = state.config.notices.empty_list_no_content;

    let outcome = outcome.map(|notices| notices.into_iter().map(NoticeResponse::from).collect::<Vec<_>>());

    Ok(render(outcome, |notices| {
        if notices.is_empty() && empty_as_no_content {
            StatusCode::NO_CONTENT.into_response()
        } else {
            Json(notices).into_response()
        }
    }))
}

/// Fetches a single active notice.
///
/// # Errors
/// Returns `AppError::Database` if the store fails.
pub async fn get_notice(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let cancel = state.shutdown.child_token();
    let outcome = state.notice_service.get_by_id(GetNoticeQuery { id }, &cancel).await?;
    Ok(render(outcome.map(NoticeResponse::from), Json))
}

/// Creates a notice.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not a JSON object of the expected shape.
/// Returns `AppError::Database` if the store fails.
pub async fn create_notice(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateNoticeRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(payload) = payload?;
    let cancel = state.shutdown.child_token();
    let outcome = state.notice_service.create(payload.into(), &cancel).await?;
    Ok(render(outcome.map(NoticeResponse::from), Json))
}

/// Replaces the message of a notice. Any `title` in the body is ignored.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not valid JSON.
/// Returns `AppError::Database` if the store fails.
pub async fn update_notice(State(state): State<AppState>, Path(id): Path<i64>, body: Bytes) -> Result<Response> {
    let body = parse_optional_body(&body)?;
    let command = UpdateNoticeCommand { id, body: body.map(Into::into) };

    let cancel = state.shutdown.child_token();
    let outcome = state.notice_service.update(command, &cancel).await?;
    Ok(render(outcome.map(NoticeResponse::from), Json))
}

/// Soft-deletes a notice.
///
/// # Errors
/// Returns `AppError::Database` if the store fails.
pub async fn delete_notice(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let cancel = state.shutdown.child_token();
    let outcome = state.notice_service.delete(DeleteNoticeCommand { id }, &cancel).await?;
    Ok(render(outcome, |()| StatusCode::NO_CONTENT))
}

/// An empty body or a literal `null` is reported as missing so validation can flag it.
fn parse_optional_body(body: &[u8]) -> Result<Option<UpdateNoticeRequest>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<UpdateNoticeRequest>>(body)
        .map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_body() {
        assert!(parse_optional_body(b"").unwrap().is_none());
        assert!(parse_optional_body(b"  \n").unwrap().is_none());
        assert!(parse_optional_body(b"null").unwrap().is_none());

        let parsed = parse_optional_body(br#"{"message":"hi"}"#).unwrap().unwrap();
        assert_eq!(parsed.message.as_deref(), Some("hi"));

        assert!(matches!(parse_optional_body(b"{not json"), Err(AppError::BadRequest(_))));
    }
}
