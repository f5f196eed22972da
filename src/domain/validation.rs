use crate::domain::notice::{NewNotice, TITLE_MAX_CHARS};
use crate::domain::request::{CreateNoticeCommand, DeleteNoticeCommand, GetNoticeQuery, UpdateNoticeCommand};

pub const ID_NOT_POSITIVE: &str = "Id must be greater than zero";
pub const BODY_REQUIRED: &str = "Request body is required";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_EMPTY: &str = "Title cannot be empty";
pub const TITLE_TOO_LONG: &str = "Title must be at most 50 characters";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const MESSAGE_EMPTY: &str = "Message cannot be empty";

/// A single field-level rule failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

fn check_id(id: i64, violations: &mut Vec<Violation>) {
    if id <= 0 {
        violations.push(Violation::new("id", ID_NOT_POSITIVE));
    }
}

fn check_required_text(
    field: &str,
    value: Option<&str>,
    required: &str,
    empty: &str,
    violations: &mut Vec<Violation>,
) {
    match value {
        None => violations.push(Violation::new(field, required)),
        Some(text) if text.trim().is_empty() => violations.push(Violation::new(field, empty)),
        Some(_) => {}
    }
}

#[must_use]
pub fn validate_get(query: &GetNoticeQuery) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_id(query.id, &mut violations);
    violations
}

#[must_use]
pub fn validate_delete(command: &DeleteNoticeCommand) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_id(command.id, &mut violations);
    violations
}

#[must_use]
pub fn validate_create(command: &CreateNoticeCommand) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_required_text("title", command.title.as_deref(), TITLE_REQUIRED, TITLE_EMPTY, &mut violations);
    if command.title.as_deref().is_some_and(|title| title.chars().count() > TITLE_MAX_CHARS) {
        violations.push(Violation::new("title", TITLE_TOO_LONG));
    }

    check_required_text("message", command.message.as_deref(), MESSAGE_REQUIRED, MESSAGE_EMPTY, &mut violations);
    violations
}

/// Message rules only run once a body is present.
#[must_use]
pub fn validate_update(command: &UpdateNoticeCommand) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_id(command.id, &mut violations);

    match &command.body {
        None => violations.push(Violation::new("body", BODY_REQUIRED)),
        Some(body) => {
            check_required_text("message", body.message.as_deref(), MESSAGE_REQUIRED, MESSAGE_EMPTY, &mut violations);
        }
    }
    violations
}

/// An update that passed [`validate_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUpdate {
    pub id: i64,
    pub message: String,
}

impl TryFrom<CreateNoticeCommand> for NewNotice {
    type Error = Vec<Violation>;

    fn try_from(command: CreateNoticeCommand) -> Result<Self, Self::Error> {
        let violations = validate_create(&command);
        match (command.title, command.message) {
            (Some(title), Some(message)) if violations.is_empty() => Ok(Self { title, message }),
            _ => Err(violations),
        }
    }
}

impl TryFrom<UpdateNoticeCommand> for MessageUpdate {
    type Error = Vec<Violation>;

    fn try_from(command: UpdateNoticeCommand) -> Result<Self, Self::Error> {
        let violations = validate_update(&command);
        match command.body.and_then(|body| body.message) {
            Some(message) if violations.is_empty() => Ok(Self { id: command.id, message }),
            _ => Err(violations),
        }
    }
}
