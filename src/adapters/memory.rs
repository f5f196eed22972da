use crate::adapters::{DeleteResult, NoticeRepository};
use crate::domain::notice::{NewNotice, Notice};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    // Keyed by id, so iteration follows insertion order.
    rows: BTreeMap<i64, Notice>,
}

impl Store {
    fn active_rows(&self) -> impl Iterator<Item = &Notice> {
        self.rows.values().filter(|n| n.active)
    }

    fn active(&self, id: i64) -> Option<&Notice> {
        self.rows.get(&id).filter(|n| n.active)
    }

    fn active_mut(&mut self, id: i64) -> Option<&mut Notice> {
        self.rows.get_mut(&id).filter(|n| n.active)
    }
}

/// Process-local notice store. Deleted notices stay in memory with `active = false`.
#[derive(Debug, Default)]
pub struct InMemoryNoticeRepository {
    store: RwLock<Store>,
}

impl InMemoryNoticeRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, deleted ones included.
    pub async fn stored_count(&self) -> usize {
        self.store.read().await.rows.len()
    }
}

#[async_trait]
impl NoticeRepository for InMemoryNoticeRepository {
    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn list_active(&self) -> Result<Vec<Notice>> {
        Ok(self.store.read().await.active_rows().cloned().collect())
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn get_by_id(&self, id: i64) -> Result<Option<Notice>> {
        Ok(self.store.read().await.active(id).cloned())
    }

    #[tracing::instrument(level = "debug", skip(self, draft), err)]
    async fn create(&self, draft: NewNotice) -> Result<Notice> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let notice = draft.into_notice(store.last_id, OffsetDateTime::now_utc());
        store.rows.insert(notice.id, notice.clone());
        Ok(notice)
    }

    #[tracing::instrument(level = "debug", skip(self, notice), fields(notice_id = notice.id), err)]
    async fn update(&self, notice: &Notice) -> Result<Option<Notice>> {
        let mut store = self.store.write().await;
        let Some(row) = store.active_mut(notice.id) else {
            return Ok(None);
        };

        row.message.clone_from(&notice.message);
        row.updated_at = notice.updated_at;
        Ok(Some(row.clone()))
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn delete(&self, id: i64) -> Result<DeleteResult> {
        let mut store = self.store.write().await;
        match store.active_mut(id) {
            Some(row) => {
                row.deactivate();
                Ok(DeleteResult::Deleted)
            }
            None => Ok(DeleteResult::NotFound),
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
