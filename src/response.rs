use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub shown: Option<usize>,
    pub total: Option<usize>,
    pub has_more: Option<bool>,
}

impl Meta {
    pub fn window(shown: usize, total: usize, has_more: bool) -> Self {
        Self {
            shown: Some(shown),
            total: Some(total),
            has_more: Some(has_more),
        }
    }

    pub fn total(total: usize) -> Self {
        Self {
            shown: Some(total),
            total: Some(total),
            has_more: Some(false),
        }
    }

    pub fn empty() -> Self {
        Self {
            shown: None,
            total: None,
            has_more: None,
        }
    }
}

/// Envelope for every dashboard response. `message` is the notification
/// text the UI shows.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
