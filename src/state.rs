use std::sync::Arc;

use crate::{backend::Backend, session::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_sessions(backend, SessionStore::default())
    }

    pub fn with_sessions(backend: Arc<dyn Backend>, sessions: SessionStore) -> Self {
        Self { backend, sessions }
    }
}
