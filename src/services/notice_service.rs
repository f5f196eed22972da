use crate::adapters::NoticeRepository;
use crate::domain::notice::{NewNotice, Notice};
use crate::domain::outcome::Outcome;
use crate::domain::request::{CreateNoticeCommand, DeleteNoticeCommand, GetNoticeQuery, UpdateNoticeCommand};
use crate::domain::validation::{self, MessageUpdate};
use crate::error::{AppError, Result};
use crate::services::handlers::{
    CreateNoticeHandler, DeleteNoticeHandler, GetNoticeHandler, ListNoticesHandler, UpdateNoticeHandler,
};
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) operations_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("notice-board");
        Self {
            operations_total: meter
                .u64_counter("notice_operations_total")
                .with_description("Notice operations by outcome")
                .build(),
        }
    }
}

/// Request pipeline: validator first, then the matching handler.
///
/// Requests with violations never reach a handler.
#[derive(Clone, Debug)]
pub struct NoticeService {
    list_handler: ListNoticesHandler,
    get_handler: GetNoticeHandler,
    create_handler: CreateNoticeHandler,
    update_handler: UpdateNoticeHandler,
    delete_handler: DeleteNoticeHandler,
    metrics: Metrics,
}

impl NoticeService {
    #[must_use]
    pub fn new(repo: Arc<dyn NoticeRepository>) -> Self {
        Self {
            list_handler: ListNoticesHandler::new(Arc::clone(&repo)),
            get_handler: GetNoticeHandler::new(Arc::clone(&repo)),
            create_handler: CreateNoticeHandler::new(Arc::clone(&repo)),
            update_handler: UpdateNoticeHandler::new(Arc::clone(&repo)),
            delete_handler: DeleteNoticeHandler::new(repo),
            metrics: Metrics::new(),
        }
    }

    fn record<T>(&self, operation: &'static str, result: Result<Outcome<T>>) -> Result<Outcome<T>> {
        let outcome = match &result {
            Ok(outcome) => outcome.kind(),
            Err(AppError::Cancelled) => "cancelled",
            Err(_) => "error",
        };
        self.metrics
            .operations_total
            .add(1, &[KeyValue::new("operation", operation), KeyValue::new("outcome", outcome)]);

        if let Ok(Outcome::BadRequest(violations)) = &result {
            tracing::debug!(operation, violations = violations.len(), "Request rejected by validation");
        }
        result
    }

    /// Lists every active notice.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Outcome<Vec<Notice>>> {
        let result = self.list_handler.handle(cancel).await;
        self.record("list", result)
    }

    /// Fetches one active notice.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    #[tracing::instrument(skip(self, cancel), fields(notice_id = query.id))]
    pub async fn get_by_id(&self, query: GetNoticeQuery, cancel: &CancellationToken) -> Result<Outcome<Notice>> {
        let violations = validation::validate_get(&query);
        let result = if violations.is_empty() {
            self.get_handler.handle(query, cancel).await
        } else {
            Ok(Outcome::BadRequest(violations))
        };
        self.record("get", result)
    }

    /// Creates a notice from a title and a message.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    #[tracing::instrument(skip(self, command, cancel))]
    pub async fn create(&self, command: CreateNoticeCommand, cancel: &CancellationToken) -> Result<Outcome<Notice>> {
        let result = match NewNotice::try_from(command) {
            Ok(draft) => self.create_handler.handle(draft, cancel).await,
            Err(violations) => Ok(Outcome::BadRequest(violations)),
        };
        if let Ok(Outcome::Ok(notice)) = &result {
            tracing::info!(notice_id = notice.id, "Notice created");
        }
        self.record("create", result)
    }

    /// Replaces the message of a notice.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    #[tracing::instrument(skip(self, command, cancel), fields(notice_id = command.id))]
    pub async fn update(&self, command: UpdateNoticeCommand, cancel: &CancellationToken) -> Result<Outcome<Notice>> {
        let result = match MessageUpdate::try_from(command) {
            Ok(update) => self.update_handler.handle(update, cancel).await,
            Err(violations) => Ok(Outcome::BadRequest(violations)),
        };
        self.record("update", result)
    }

    /// Soft-deletes a notice.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    #[tracing::instrument(skip(self, cancel), fields(notice_id = command.id))]
    pub async fn delete(&self, command: DeleteNoticeCommand, cancel: &CancellationToken) -> Result<Outcome<()>> {
        let violations = validation::validate_delete(&command);
        let result = if violations.is_empty() {
            self.delete_handler.handle(command, cancel).await
        } else {
            Ok(Outcome::BadRequest(violations))
        };
        if matches!(result, Ok(Outcome::NoContent)) {
            tracing::info!("Notice deleted");
        }
        self.record("delete", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryNoticeRepository;
    use crate::domain::request::UpdateNoticeBody;
    use crate::domain::validation::{BODY_REQUIRED, ID_NOT_POSITIVE, TITLE_TOO_LONG};

    fn service() -> NoticeService {
        NoticeService::new(Arc::new(InMemoryNoticeRepository::new()))
    }

    fn create_command(title: &str, message: &str) -> CreateNoticeCommand {
        CreateNoticeCommand { title: Some(title.to_string()), message: Some(message.to_string()) }
    }

    fn update_command(id: i64, message: &str) -> UpdateNoticeCommand {
        UpdateNoticeCommand { id, body: Some(UpdateNoticeBody { message: Some(message.to_string()) }) }
    }

    fn violation_messages<T>(outcome: Outcome<T>) -> Vec<String> {
        match outcome {
            Outcome::BadRequest(violations) => violations.into_iter().map(|v| v.message).collect(),
            _ => panic!("expected BadRequest"),
        }
    }

    #[tokio::test]
    async fn test_title_length_boundary() {
        let service = service();
        let cancel = CancellationToken::new();

        let ok = service.create(create_command(&"A".repeat(50), "m"), &cancel).await.unwrap();
        assert!(ok.is_ok());

        let rejected = service.create(create_command(&"A".repeat(51), "m"), &cancel).await.unwrap();
        assert_eq!(violation_messages(rejected), vec![TITLE_TOO_LONG]);
    }

    #[tokio::test]
    async fn test_created_notice_shape() {
        let service = service();
        let notice = service
            .create(create_command("Title", "Body"), &CancellationToken::new())
            .await
            .unwrap()
            .into_ok()
            .unwrap();

        assert!(notice.active);
        assert!(notice.updated_at.is_none());
        assert_eq!(notice.title, "Title");
    }

    #[tokio::test]
    async fn test_delete_lifecycle() {
        let service = service();
        let cancel = CancellationToken::new();
        let mut last_id = 0;
        for i in 0..7 {
            last_id = service
                .create(create_command(&format!("Notice {i}"), "m"), &cancel)
                .await
                .unwrap()
                .into_ok()
                .unwrap()
                .id;
        }
        assert_eq!(last_id, 7);

        assert!(service.get_by_id(GetNoticeQuery { id: 7 }, &cancel).await.unwrap().is_ok());
        assert_eq!(service.delete(DeleteNoticeCommand { id: 7 }, &cancel).await.unwrap(), Outcome::NoContent);
        assert_eq!(service.get_by_id(GetNoticeQuery { id: 7 }, &cancel).await.unwrap(), Outcome::NotFound);
        assert_eq!(service.delete(DeleteNoticeCommand { id: 7 }, &cancel).await.unwrap(), Outcome::NotFound);

        let listed = service.list(&cancel).await.unwrap().into_ok().unwrap();
        assert_eq!(listed.len(), 6);
        assert!(listed.iter().all(|n| n.id != 7));
    }

    #[tokio::test]
    async fn test_updates_apply_in_order() {
        let service = service();
        let cancel = CancellationToken::new();
        for _ in 0..3 {
            service.create(create_command("Title", "orig"), &cancel).await.unwrap();
        }

        service.update(update_command(3, "v1"), &cancel).await.unwrap();
        service.update(update_command(3, "v2"), &cancel).await.unwrap();

        let notice = service.get_by_id(GetNoticeQuery { id: 3 }, &cancel).await.unwrap().into_ok().unwrap();
        assert_eq!(notice.message, "v2");
        assert_eq!(notice.title, "Title");
        assert!(notice.updated_at.unwrap() >= notice.created_at);
    }

    #[tokio::test]
    async fn test_non_positive_ids_are_bad_requests() {
        let service = service();
        let cancel = CancellationToken::new();

        for id in [0, -1] {
            let outcome = service.get_by_id(GetNoticeQuery { id }, &cancel).await.unwrap();
            assert_eq!(violation_messages(outcome), vec![ID_NOT_POSITIVE]);

            let outcome = service.delete(DeleteNoticeCommand { id }, &cancel).await.unwrap();
            assert_eq!(violation_messages(outcome), vec![ID_NOT_POSITIVE]);
        }
    }

    #[tokio::test]
    async fn test_update_validation_short_circuits() {
        let service = service();
        let cancel = CancellationToken::new();

        let outcome = service.update(UpdateNoticeCommand { id: 1, body: None }, &cancel).await.unwrap();
        assert_eq!(violation_messages(outcome), vec![BODY_REQUIRED]);

        // Id 1 does not exist, but validation answers first.
        let outcome = service.update(update_command(1, "   "), &cancel).await.unwrap();
        assert!(matches!(outcome, Outcome::BadRequest(_)));

        let outcome = service.update(update_command(1, "fine"), &cancel).await.unwrap();
        assert_eq!(outcome, Outcome::NotFound);
    }
}
