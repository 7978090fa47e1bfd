//! Process-wide registry of live sessions.
//!
//! Locking is two-tier. The store's `RwLock` guards only the id → session
//! map and is held for the map operation alone. Each session sits behind its
//! own `Mutex`, taken by [`SessionStore::with_session`] for the whole callback.
//! The store lock is always released before a session lock is taken, so the
//! two are never held in the opposite order.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use time::{Duration, OffsetDateTime};

use crate::domain::session::{PlayerId, Session, SessionConfig, SessionId};
use crate::errors::domain::DomainError;
use crate::utils::tokens::{generate_token, unique_token, PLAYER_ID_LEN, SESSION_ID_LEN};

type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `config`, allocate a fresh session id and store a new session
    /// with the host enrolled.
    ///
    /// Returns the session id, the host's player id and a snapshot of the
    /// stored session.
    pub fn create(
        &self,
        config: SessionConfig,
        now: OffsetDateTime,
    ) -> Result<(SessionId, PlayerId, Session), DomainError> {
        config.validate()?;

        // Player ids live in a per-session namespace; the session is empty here.
        let host_id = generate_token(PLAYER_ID_LEN);

        let mut sessions = self.sessions.write();
        let session_id = unique_token(SESSION_ID_LEN, |candidate| {
            sessions.contains_key(candidate)
        })?;
        let session = Session::new(session_id.clone(), host_id.clone(), config, now);
        sessions.insert(session_id.clone(), Arc::new(Mutex::new(session.clone())));

        Ok((session_id, host_id, session))
    }

    fn handle(&self, session_id: &str) -> Result<SessionHandle, DomainError> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .ok_or_else(|| DomainError::session_not_found(session_id))
    }

    /// Snapshot of a session.
    pub fn get(&self, session_id: &str) -> Result<Session, DomainError> {
        let handle = self.handle(session_id)?;
        let session = handle.lock().clone();
        Ok(session)
    }

    /// Run `f` with exclusive access to a session.
    ///
    /// This is the only way to mutate a stored session. The session lock is
    /// held for the duration of `f` and released on every exit path.
    pub fn with_session<R, F>(&self, session_id: &str, f: F) -> Result<R, DomainError>
    where
        F: FnOnce(&mut Session) -> Result<R, DomainError>,
    {
        let handle = self.handle(session_id)?;
        let mut session = handle.lock();
        f(&mut session)
    }

    /// Remove every session whose `updated_at` is older than `now - ttl`.
    ///
    /// A session whose lock is currently held is in use and is kept; the next
    /// sweep looks at it again. Returns the evicted ids. A `ttl` reaching
    /// past the calendar start evicts nothing.
    pub fn evict_expired(&self, ttl: Duration, now: OffsetDateTime) -> Vec<SessionId> {
        let Some(cutoff) = now.checked_sub(ttl) else {
            return Vec::new();
        };
        let mut evicted = Vec::new();

        self.sessions.write().retain(|session_id, handle| {
            let Some(session) = handle.try_lock() else {
                return true;
            };
            if session.updated_at() < cutoff {
                evicted.push(session_id.clone());
                false
            } else {
                true
            }
        });

        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.read().contains_key(session_id)
    }
}
