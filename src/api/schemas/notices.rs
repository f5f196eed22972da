use crate::domain::notice::Notice;
use crate::domain::request::{CreateNoticeCommand, UpdateNoticeBody};
use crate::domain::validation::Violation;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeRequest {
    pub title: Option<String>,
    pub message: Option<String>,
}

impl From<CreateNoticeRequest> for CreateNoticeCommand {
    fn from(request: CreateNoticeRequest) -> Self {
        Self { title: request.title, message: request.message }
    }
}

/// Only `message` is read; any `title` or other field is dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoticeRequest {
    pub message: Option<String>,
}

impl From<UpdateNoticeRequest> for UpdateNoticeBody {
    fn from(request: UpdateNoticeRequest) -> Self {
        Self { message: request.message }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponse {
    pub id: i64,
    pub active: bool,
    pub title: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Notice> for NoticeResponse {
    fn from(notice: Notice) -> Self {
        Self {
            id: notice.id,
            active: notice.active,
            title: notice.title,
            message: notice.message,
            created_at: notice.created_at,
            updated_at: notice.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViolationResponse {
    pub field: String,
    pub message: String,
}

impl From<Violation> for ViolationResponse {
    fn from(violation: Violation) -> Self {
        Self { field: violation.field, message: violation.message }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub violations: Vec<ViolationResponse>,
}

impl From<Vec<Violation>> for ValidationErrorResponse {
    fn from(violations: Vec<Violation>) -> Self {
        Self {
            error: "Validation failed".to_string(),
            violations: violations.into_iter().map(Into::into).collect(),
        }
    }
}
