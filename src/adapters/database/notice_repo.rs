use crate::adapters::database::DbPool;
use crate::adapters::database::records::NoticeRecord;
use crate::adapters::{DeleteResult, NoticeRepository};
use crate::domain::notice::{NewNotice, Notice};
use crate::error::Result;
use async_trait::async_trait;

/// Selects active notices. All reads go through here so the soft-delete filter lives in one place.
macro_rules! select_active {
    ($tail:literal) => {
        concat!(
            "SELECT id, active, title, message, created_at, updated_at FROM notices WHERE active = TRUE",
            $tail
        )
    };
}

#[derive(Clone, Debug)]
pub struct PgNoticeRepository {
    pool: DbPool,
}

impl PgNoticeRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoticeRepository for PgNoticeRepository {
    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn list_active(&self) -> Result<Vec<Notice>> {
        let records = sqlx::query_as::<_, NoticeRecord>(select_active!(" ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn get_by_id(&self, id: i64) -> Result<Option<Notice>> {
        let record = sqlx::query_as::<_, NoticeRecord>(select_active!(" AND id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self, draft), err)]
    async fn create(&self, draft: NewNotice) -> Result<Notice> {
        let record = sqlx::query_as::<_, NoticeRecord>(
            r#"
            INSERT INTO notices (title, message)
            VALUES ($1, $2)
            RETURNING id, active, title, message, created_at, updated_at
            "#,
        )
        .bind(draft.title)
        .bind(draft.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    #[tracing::instrument(level = "debug", skip(self, notice), fields(notice_id = notice.id), err)]
    async fn update(&self, notice: &Notice) -> Result<Option<Notice>> {
        // Title is immutable and never part of the SET list. Timestamps come from the
        // database clock, same as `created_at`.
        let record = sqlx::query_as::<_, NoticeRecord>(
            r#"
            UPDATE notices
            SET message = $2, updated_at = NOW()
            WHERE id = $1 AND active = TRUE
            RETURNING id, active, title, message, created_at, updated_at
            "#,
        )
        .bind(notice.id)
        .bind(&notice.message)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn delete(&self, id: i64) -> Result<DeleteResult> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, NoticeRecord>(select_active!(" AND id = $1 FOR UPDATE"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        // Dropping the transaction rolls it back.
        let Some(record) = record else {
            return Ok(DeleteResult::NotFound);
        };

        let mut notice = Notice::from(record);
        notice.deactivate();

        sqlx::query("UPDATE notices SET active = $2, updated_at = NOW() WHERE id = $1")
            .bind(notice.id)
            .bind(notice.active)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(DeleteResult::Deleted)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
