//! Session service: the operations the HTTP adapter exposes.
//!
//! Each call reads `now` once from the clock, runs one store operation and
//! returns the resulting projection. Nothing here holds a session lock across
//! anything but in-memory work.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::domain::avatar::Avatar;
use crate::domain::item::Item;
use crate::domain::prompt::choose_prompt;
use crate::domain::session::{PlayerId, Session, SessionConfig, SessionId};
use crate::domain::view::SessionView;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::services::catalog::{select_items, CatalogProvider};
use crate::services::session_store::SessionStore;
use crate::utils::clock::Clock;

const DEFAULT_HOST_NAME: &str = "Player 1";

/// Create parameters; every field is optional and falls back to config.
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub prompt_id: Option<String>,
    pub prompt_label: Option<String>,
    /// Explicit items; when absent they are selected from the catalog.
    pub items: Option<Vec<Item>>,
    pub duration_seconds: Option<i64>,
    pub max_players: Option<usize>,
    pub limit: Option<usize>,
    pub per_category: Option<usize>,
    pub avatar: Option<String>,
    pub name: Option<String>,
}

/// Result of create and join: the caller's player id plus the current view.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub view: SessionView,
}

pub struct SessionService {
    store: SessionStore,
    catalog: Arc<dyn CatalogProvider>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
}

impl SessionService {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        clock: Arc<dyn Clock>,
        config: GameConfig,
    ) -> Self {
        Self {
            store: SessionStore::new(),
            catalog,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog_items(&self) -> Vec<Item> {
        self.catalog.items()
    }

    /// Create a session with the caller enrolled as host.
    pub fn create_session(&self, request: NewSession) -> Result<Enrollment, AppError> {
        self.evict_expired();
        let now = self.clock.now();

        let host_avatar = Avatar::resolve(request.avatar.as_deref())?;
        let host_name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_HOST_NAME)
            .to_string();
        let preset = choose_prompt(
            request.prompt_id.as_deref(),
            request.prompt_label.as_deref(),
        );

        let mut config = SessionConfig {
            prompt: preset.into(),
            items: Vec::new(),
            duration_seconds: request
                .duration_seconds
                .unwrap_or(self.config.duration_seconds),
            max_players: request.max_players.unwrap_or(self.config.max_players),
            host_avatar,
            host_name,
        };
        config.validate()?;

        config.items = match request.items.filter(|items| !items.is_empty()) {
            Some(mut items) => {
                items.iter_mut().for_each(Item::mark_ready);
                items
            }
            None => select_items(
                &self.catalog.items(),
                preset,
                positive_or(request.per_category, self.config.per_category),
                positive_or(request.limit, self.config.item_limit),
            )?,
        };

        let (session_id, player_id, session) = self.store.create(config, now)?;
        info!(
            session_id = %session_id,
            host_id = %Redacted(&player_id),
            prompt = %session.prompt().id,
            items = session.items().len(),
            max_players = session.max_players(),
            duration_seconds = session.duration_seconds(),
            "Session created"
        );

        let view = self
            .store
            .with_session(&session_id, |session| Ok(observe(session, now)))?;
        Ok(Enrollment {
            session_id,
            player_id,
            view,
        })
    }

    /// Enrol a new player in an existing session.
    pub fn join_session(
        &self,
        session_id: &str,
        avatar: Option<&str>,
        name: Option<&str>,
    ) -> Result<Enrollment, AppError> {
        self.evict_expired();
        let now = self.clock.now();
        let avatar = Avatar::resolve(avatar)?;

        let (player_id, view) = self.store.with_session(session_id, |session| {
            let player_id = session.join(avatar, name, now)?;
            Ok((player_id, observe(session, now)))
        })?;

        info!(
            session_id,
            player_id = %Redacted(&player_id),
            players = view.players.len(),
            "Player joined"
        );
        Ok(Enrollment {
            session_id: session_id.to_string(),
            player_id,
            view,
        })
    }

    /// Current view. Polling counts as activity and keeps the session alive.
    pub fn get_state(&self, session_id: &str) -> Result<SessionView, AppError> {
        let now = self.clock.now();
        let view = self.store.with_session(session_id, |session| {
            session.touch(now);
            Ok(observe(session, now))
        })?;
        Ok(view)
    }

    pub fn start_session(
        &self,
        session_id: &str,
        player_id: &str,
    ) -> Result<SessionView, AppError> {
        let now = self.clock.now();
        let (started_at, view) = self.store.with_session(session_id, |session| {
            let started_at = session.start(player_id, now).inspect_err(|err| {
                if matches!(err, DomainError::Forbidden(_)) {
                    security::host_action_denied("start", session_id, player_id);
                }
            })?;
            Ok((started_at, observe(session, now)))
        })?;

        info!(session_id, %started_at, "Session started");
        Ok(view)
    }

    pub fn pick_item(
        &self,
        session_id: &str,
        player_id: &str,
        item_id: &str,
        rendered_image: Option<String>,
    ) -> Result<SessionView, AppError> {
        let now = self.clock.now();
        let view = self.store.with_session(session_id, |session| {
            session.pick(player_id, item_id, rendered_image, now)?;
            Ok(observe(session, now))
        })?;

        debug!(
            session_id,
            player_id = %Redacted(player_id),
            item_id,
            "Pick recorded"
        );
        Ok(view)
    }

    pub fn cast_vote(
        &self,
        session_id: &str,
        voter_id: &str,
        target_id: &str,
    ) -> Result<SessionView, AppError> {
        let now = self.clock.now();
        let view = self.store.with_session(session_id, |session| {
            session.vote(voter_id, target_id, now)?;
            Ok(observe(session, now))
        })?;

        debug!(
            session_id,
            voter_id = %Redacted(voter_id),
            target_id = %Redacted(target_id),
            "Vote recorded"
        );
        Ok(view)
    }

    /// Drop sessions idle for longer than the configured TTL.
    pub fn evict_expired(&self) -> usize {
        let evicted = self
            .store
            .evict_expired(self.config.game_ttl(), self.clock.now());
        if !evicted.is_empty() {
            info!(
                count = evicted.len(),
                remaining = self.store.len(),
                "Evicted idle sessions"
            );
        }
        evicted.len()
    }
}

/// Project `session` at `now` and record the derived values on it.
fn observe(session: &mut Session, now: time::OffsetDateTime) -> SessionView {
    let view = session.project(now);
    if let Some(previous) = session.cache_projection(&view) {
        debug!(
            session_id = session.id(),
            from = ?previous,
            to = ?view.phase,
            "Phase changed"
        );
    }
    view
}

fn positive_or(value: Option<usize>, fallback: usize) -> usize {
    value.filter(|n| *n > 0).unwrap_or(fallback)
}
