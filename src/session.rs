use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    backend::Credentials,
    catalog::{FormDraft, ProductsPage},
    models::Profile,
    orders::OrderBoard,
};

/// Everything one logged-in admin has on screen.
///
/// Each session owns its own snapshots; another session's changes only show
/// up after a refresh.
#[derive(Debug)]
pub struct DashboardSession {
    pub credentials: Credentials,
    pub profile: Profile,
    pub products: ProductsPage,
    pub create_form: FormDraft,
    pub orders: OrderBoard,
}

impl DashboardSession {
    pub fn new(credentials: Credentials, profile: Profile) -> Self {
        Self {
            credentials,
            profile,
            products: ProductsPage::default(),
            create_form: FormDraft::empty(),
            orders: OrderBoard::default(),
        }
    }
}

pub type SharedSession = Arc<Mutex<DashboardSession>>;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Live dashboard sessions keyed by the bearer token handed out at login.
///
/// A session unused for longer than the idle timeout is dropped; expired
/// entries are pruned whenever the store is touched.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle,
        }
    }

    pub async fn insert(&self, session: DashboardSession) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.inner.write().await;
        self.prune(&mut sessions);
        sessions.insert(
            id,
            Entry {
                session: Arc::new(Mutex::new(session)),
                last_seen: Instant::now(),
            },
        );
        id
    }

    /// Looks up a session and marks it as used.
    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        let mut sessions = self.inner.write().await;
        let now = Instant::now();
        let entry = sessions.get_mut(id)?;
        if now.duration_since(entry.last_seen) <= self.idle {
            entry.last_seen = now;
            return Some(entry.session.clone());
        }
        sessions.remove(id);
        tracing::debug!(session = %id, "session expired");
        None
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        self.inner.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        let mut sessions = self.inner.write().await;
        self.prune(&mut sessions);
        sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, Entry>) {
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.idle);
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!(expired, "pruned idle sessions");
        }
    }
}
