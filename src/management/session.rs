use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::{management::TokenManager, types::PendingLogin, utils};

pub const SESSION_COOKIE: &str = "moodlist_session";

/// Sessions untouched for this long are dropped.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

/// State of one browser session of the web form.
#[derive(Debug, Clone)]
pub struct Session {
    pub login: Option<PendingLogin>,
    pub tokens: Option<TokenManager>,
    last_seen: Instant,
}

impl Session {
    fn new() -> Self {
        Session {
            login: None,
            tokens: None,
            last_seen: Instant::now(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }
}

/// In-memory session map shared by the web handlers.
///
/// Sessions are only created by [`SessionStore::create`] and expire after
/// [`SESSION_IDLE_TIMEOUT`] without a request. Nothing is written to disk.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(SESSION_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        SessionStore {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Starts a new session and returns its id.
    pub async fn create(&self) -> String {
        let mut sessions = self.sessions.lock().await;
        self.purge_expired(&mut sessions);

        let id = utils::generate_state();
        sessions.insert(id.clone(), Session::new());
        id
    }

    /// Returns `id` when it names a live session and marks it as seen.
    /// Unknown or expired ids yield `None`; no session is created.
    pub async fn touch(&self, id: Option<&str>) -> Option<String> {
        let mut sessions = self.sessions.lock().await;
        self.purge_expired(&mut sessions);

        let session = sessions.get_mut(id?)?;
        session.last_seen = Instant::now();
        id.map(str::to_string)
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.lock().await.get(id).cloned()
    }

    /// Applies `f` to the session `id` if it still exists.
    pub async fn update<F, T>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.sessions.lock().await;
        sessions.get_mut(id).map(f)
    }

    pub async fn remove(&self, id: &str) {
        self.sessions.lock().await.remove(id);
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn purge_expired(&self, sessions: &mut HashMap<String, Session>) {
        let timeout = self.idle_timeout;
        sessions.retain(|_, s| s.last_seen.elapsed() < timeout);
    }
}
