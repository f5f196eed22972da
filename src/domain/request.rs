//! Typed requests for each notice operation, built by the transport layer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetNoticeQuery {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateNoticeCommand {
    pub title: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateNoticeBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNoticeCommand {
    pub id: i64,
    pub body: Option<UpdateNoticeBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteNoticeCommand {
    pub id: i64,
}
