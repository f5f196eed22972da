use crate::domain::notice::Notice;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, FromRow)]
pub struct NoticeRecord {
    pub(crate) id: i64,
    pub(crate) active: bool,
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) created_at: OffsetDateTime,
    pub(crate) updated_at: Option<OffsetDateTime>,
}

impl From<NoticeRecord> for Notice {
    fn from(record: NoticeRecord) -> Self {
        Self {
            id: record.id,
            active: record.active,
            title: record.title,
            message: record.message,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
