use std::sync::Arc;

use crate::config::GameConfig;
use crate::services::sessions::SessionService;

/// Shared handler state. Cloned per worker; every clone points at the same
/// session service.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionService>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    /// Handle for background tasks such as the sweeper.
    pub fn sessions_handle(&self) -> Arc<SessionService> {
        Arc::clone(&self.sessions)
    }

    pub fn config(&self) -> &GameConfig {
        self.sessions.config()
    }
}
