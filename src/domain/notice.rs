use time::OffsetDateTime;

/// Maximum title length, counted in characters rather than bytes.
pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: i64,
    pub active: bool,
    pub title: String,
    pub message: String,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

impl Notice {
    /// Replaces the message and stamps the modification time.
    ///
    /// The value is not validated here; callers run the request validators first.
    pub fn update_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.updated_at = Some(OffsetDateTime::now_utc());
    }

    /// Marks the notice as logically deleted.
    ///
    /// Repositories only hand out active notices, so this is never called twice on the same value.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Some(OffsetDateTime::now_utc());
    }
}

/// A notice that has not been stored yet. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotice {
    pub title: String,
    pub message: String,
}

impl NewNotice {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }

    /// Materializes the draft with a store-assigned id.
    #[must_use]
    pub fn into_notice(self, id: i64, created_at: OffsetDateTime) -> Notice {
        Notice { id, active: true, title: self.title, message: self.message, created_at, updated_at: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Notice {
        NewNotice::new("Maintenance", "Servers restart at noon").into_notice(1, OffsetDateTime::now_utc())
    }

    #[test]
    fn test_new_notice_is_active_without_updated_at() {
        let notice = sample();
        assert!(notice.active);
        assert_eq!(notice.id, 1);
        assert!(notice.updated_at.is_none());
    }

    #[test]
    fn test_update_message_keeps_title() {
        let mut notice = sample();
        notice.update_message("Moved to 2pm");

        assert_eq!(notice.message, "Moved to 2pm");
        assert_eq!(notice.title, "Maintenance");
        let updated_at = notice.updated_at.unwrap();
        assert!(updated_at >= notice.created_at);
    }

    #[test]
    fn test_deactivate_sets_flag_and_timestamp() {
        let mut notice = sample();
        notice.deactivate();

        assert!(!notice.active);
        assert!(notice.updated_at.is_some());
    }
}
