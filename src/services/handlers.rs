//! One handler per notice operation. Each receives its repository at construction time and
//! assumes its input already passed validation.

use crate::adapters::{DeleteResult, NoticeRepository};
use crate::domain::notice::{NewNotice, Notice};
use crate::domain::outcome::Outcome;
use crate::domain::request::{DeleteNoticeCommand, GetNoticeQuery};
use crate::domain::validation::MessageUpdate;
use crate::error::{AppError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn ensure_live(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() { Err(AppError::Cancelled) } else { Ok(()) }
}

/// Runs a repository call unless the token fires first. Dropping the call mid-flight is
/// safe because each repository write is atomic.
async fn cancellable<T, F>(cancel: &CancellationToken, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    ensure_live(cancel)?;
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(AppError::Cancelled),
        result = call => result,
    }
}

#[derive(Clone, Debug)]
pub struct ListNoticesHandler {
    repo: Arc<dyn NoticeRepository>,
}

impl ListNoticesHandler {
    #[must_use]
    pub fn new(repo: Arc<dyn NoticeRepository>) -> Self {
        Self { repo }
    }

    /// Always `Ok`, possibly with an empty list.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    pub async fn handle(&self, cancel: &CancellationToken) -> Result<Outcome<Vec<Notice>>> {
        let notices = cancellable(cancel, self.repo.list_active()).await?;
        ensure_live(cancel)?;
        Ok(Outcome::Ok(notices))
    }
}

#[derive(Clone, Debug)]
pub struct GetNoticeHandler {
    repo: Arc<dyn NoticeRepository>,
}

impl GetNoticeHandler {
    #[must_use]
    pub fn new(repo: Arc<dyn NoticeRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    pub async fn handle(&self, query: GetNoticeQuery, cancel: &CancellationToken) -> Result<Outcome<Notice>> {
        let notice = cancellable(cancel, self.repo.get_by_id(query.id)).await?;
        ensure_live(cancel)?;
        Ok(notice.into())
    }
}

#[derive(Clone, Debug)]
pub struct CreateNoticeHandler {
    repo: Arc<dyn NoticeRepository>,
}

impl CreateNoticeHandler {
    #[must_use]
    pub fn new(repo: Arc<dyn NoticeRepository>) -> Self {
        Self { repo }
    }

    /// A validated draft is always accepted.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    pub async fn handle(&self, draft: NewNotice, cancel: &CancellationToken) -> Result<Outcome<Notice>> {
        let created = cancellable(cancel, self.repo.create(draft)).await?;
        ensure_live(cancel)?;
        Ok(Outcome::Ok(created))
    }
}

#[derive(Clone, Debug)]
pub struct UpdateNoticeHandler {
    repo: Arc<dyn NoticeRepository>,
}

impl UpdateNoticeHandler {
    #[must_use]
    pub fn new(repo: Arc<dyn NoticeRepository>) -> Self {
        Self { repo }
    }

    /// Replaces the message of an active notice. The title is never touched.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    pub async fn handle(&self, update: MessageUpdate, cancel: &CancellationToken) -> Result<Outcome<Notice>> {
        let Some(mut notice) = cancellable(cancel, self.repo.get_by_id(update.id)).await? else {
            return Ok(Outcome::NotFound);
        };

        notice.update_message(update.message);
        let stored = cancellable(cancel, self.repo.update(&notice)).await?;
        ensure_live(cancel)?;

        // `None` means a concurrent delete won the race.
        Ok(stored.into())
    }
}

#[derive(Clone, Debug)]
pub struct DeleteNoticeHandler {
    repo: Arc<dyn NoticeRepository>,
}

impl DeleteNoticeHandler {
    #[must_use]
    pub fn new(repo: Arc<dyn NoticeRepository>) -> Self {
        Self { repo }
    }

    /// Soft-deletes an active notice. A second call for the same id yields `NotFound`.
    ///
    /// # Errors
    /// Returns `AppError::Cancelled` or a repository failure.
    pub async fn handle(&self, command: DeleteNoticeCommand, cancel: &CancellationToken) -> Result<Outcome<()>> {
        if cancellable(cancel, self.repo.get_by_id(command.id)).await?.is_none() {
            return Ok(Outcome::NotFound);
        }

        let result = cancellable(cancel, self.repo.delete(command.id)).await?;
        ensure_live(cancel)?;

        Ok(match result {
            DeleteResult::Deleted => Outcome::NoContent,
            DeleteResult::NotFound => Outcome::NotFound,
        })
    }
}
