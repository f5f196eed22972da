use crate::domain::notice::{NewNotice, Notice};
use crate::error::Result;
use async_trait::async_trait;

pub mod database;
pub mod memory;

pub use database::PgNoticeRepository;
pub use memory::InMemoryNoticeRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    Deleted,
    NotFound,
}

/// Persistence boundary for notices.
///
/// Every read, update and delete only sees active notices. Implementations apply that
/// filter in their own query path so callers never repeat it.
#[async_trait]
pub trait NoticeRepository: std::fmt::Debug + Send + Sync + 'static {
    /// All active notices in insertion order.
    async fn list_active(&self) -> Result<Vec<Notice>>;

    /// `None` when no notice has this id or the notice was deleted.
    async fn get_by_id(&self, id: i64) -> Result<Option<Notice>>;

    async fn create(&self, draft: NewNotice) -> Result<Notice>;

    /// Persists the message and modification time of an already mutated notice.
    ///
    /// Returns `None` if the notice stopped being active after it was read.
    async fn update(&self, notice: &Notice) -> Result<Option<Notice>>;

    /// Soft-deletes the active notice with this id.
    async fn delete(&self, id: i64) -> Result<DeleteResult>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<()>;
}
