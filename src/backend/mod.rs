//! The marketplace REST backend the dashboard drives.
//!
//! Every operation is one request/response pair. Nothing here retries.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    catalog::ProductPayload,
    models::{Order, OrderId, Product, ProductId, Profile},
};

pub mod http;

pub use http::HttpBackend;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend responded {status}")]
    Status { status: u16, message: Option<String> },

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Message the backend attached to a failed response, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            BackendError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// What the backend handed out at login: session cookies and, when the
/// login body carried one, a bearer token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub cookie: Option<String>,
    pub token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> BackendResult<Credentials>;

    async fn logout(&self, credentials: &Credentials) -> BackendResult<()>;

    async fn profile(&self, credentials: &Credentials) -> BackendResult<Profile>;

    /// Full product snapshot; the backend takes no filter parameters.
    async fn list_products(&self, credentials: &Credentials) -> BackendResult<Vec<Product>>;

    async fn create_product(
        &self,
        credentials: &Credentials,
        payload: &ProductPayload,
    ) -> BackendResult<Product>;

    async fn update_product(
        &self,
        credentials: &Credentials,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> BackendResult<Product>;

    async fn delete_product(&self, credentials: &Credentials, id: &ProductId) -> BackendResult<()>;

    async fn list_orders(&self, credentials: &Credentials) -> BackendResult<Vec<Order>>;

    async fn set_order_paid(
        &self,
        credentials: &Credentials,
        id: &OrderId,
        paid: bool,
    ) -> BackendResult<()>;

    async fn set_order_delivered(
        &self,
        credentials: &Credentials,
        id: &OrderId,
        delivered: bool,
    ) -> BackendResult<()>;
}
