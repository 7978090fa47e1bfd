//! In-memory model of one game session and its mutating operations.
//!
//! A `Session` is only ever reached through `SessionStore::with_session`,
//! which holds the session's lock for the duration of each call below. Every
//! operation validates first and mutates last, so a failed call leaves the
//! session untouched.

use std::collections::{BTreeMap, HashMap};

use time::OffsetDateTime;

use crate::domain::avatar::Avatar;
use crate::domain::item::Item;
use crate::domain::phase::{compute_phase, compute_winner, Outcome, Phase};
use crate::domain::prompt::Prompt;
use crate::domain::view::{PlayerView, SessionView};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::utils::tokens::{unique_token, PLAYER_ID_LEN};

pub type SessionId = String;
pub type PlayerId = String;

/// Minimum roster size for a game to start.
pub const MIN_PLAYERS: usize = 2;

/// Longest accepted draft: one day.
pub const MAX_DURATION_SECONDS: i64 = 24 * 3600;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub avatar: Avatar,
    /// Join position, 0 for the host.
    pub seat: usize,
    pub joined_at: OffsetDateTime,
    pub picked_item_id: Option<String>,
    pub rendered_image: Option<String>,
}

impl Player {
    fn new(id: PlayerId, name: String, avatar: Avatar, seat: usize, now: OffsetDateTime) -> Self {
        Self {
            id,
            name,
            avatar,
            seat,
            joined_at: now,
            picked_item_id: None,
            rendered_image: None,
        }
    }
}

/// Everything needed to open a session. Build with [`SessionConfig::validate`]
/// before handing it to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub prompt: Prompt,
    pub items: Vec<Item>,
    pub duration_seconds: i64,
    pub max_players: usize,
    pub host_avatar: Avatar,
    pub host_name: String,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.duration_seconds <= 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidDuration,
                format!(
                    "durationSeconds must be positive, got {}",
                    self.duration_seconds
                ),
            ));
        }
        if self.duration_seconds > MAX_DURATION_SECONDS {
            return Err(DomainError::validation(
                ValidationKind::InvalidDuration,
                format!(
                    "durationSeconds must be at most {MAX_DURATION_SECONDS}, got {}",
                    self.duration_seconds
                ),
            ));
        }
        if self.max_players < MIN_PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidMaxPlayers,
                format!(
                    "maxPlayers must be at least {MIN_PLAYERS}, got {}",
                    self.max_players
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    duration_seconds: i64,
    start_time: Option<OffsetDateTime>,
    host_id: PlayerId,
    max_players: usize,
    prompt: Prompt,
    items: Vec<Item>,
    players: HashMap<PlayerId, Player>,
    votes: BTreeMap<PlayerId, PlayerId>,
    // Last projected values. Phase is never read by game logic; the outcome
    // is reported again while the game is not done.
    cached_phase: Phase,
    cached_winner: Option<PlayerId>,
    cached_tie: bool,
}

impl Session {
    /// Open a session with `host_id` enrolled as its only player.
    pub fn new(
        id: SessionId,
        host_id: PlayerId,
        config: SessionConfig,
        now: OffsetDateTime,
    ) -> Self {
        let host = Player::new(
            host_id.clone(),
            config.host_name,
            config.host_avatar,
            0,
            now,
        );
        let mut players = HashMap::new();
        players.insert(host_id.clone(), host);

        Self {
            id,
            created_at: now,
            updated_at: now,
            duration_seconds: config.duration_seconds,
            start_time: None,
            host_id,
            max_players: config.max_players,
            prompt: config.prompt,
            items: config.items,
            players,
            votes: BTreeMap::new(),
            cached_phase: Phase::Waiting,
            cached_winner: None,
            cached_tie: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    pub fn duration_seconds(&self) -> i64 {
        self.duration_seconds
    }

    pub fn start_time(&self) -> Option<OffsetDateTime> {
        self.start_time
    }

    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players in no particular order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Players in join order, host first.
    pub fn roster(&self) -> Vec<&Player> {
        let mut roster: Vec<&Player> = self.players.values().collect();
        roster.sort_by_key(|p| p.seat);
        roster
    }

    pub fn votes(&self) -> &BTreeMap<PlayerId, PlayerId> {
        &self.votes
    }

    /// Phase recorded by the last projection.
    pub fn cached_phase(&self) -> Phase {
        self.cached_phase
    }

    /// Refresh `updated_at`; never moves it backwards.
    pub fn touch(&mut self, now: OffsetDateTime) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Enrol a new player. Blank names become `"Player N"`.
    pub fn join(
        &mut self,
        avatar: Avatar,
        name: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<PlayerId, DomainError> {
        if self.players.len() >= self.max_players {
            return Err(DomainError::conflict(
                ConflictKind::SessionFull,
                "Game is full.",
            ));
        }

        let player_id = unique_token(PLAYER_ID_LEN, |candidate| {
            self.players.contains_key(candidate)
        })?;
        let seat = self.players.len();
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Player {}", seat + 1),
        };

        let player = Player::new(player_id.clone(), name, avatar, seat, now);
        self.players.insert(player_id.clone(), player);
        self.touch(now);
        Ok(player_id)
    }

    /// Start the draft clock. Host only; a repeat call keeps the first start time.
    pub fn start(
        &mut self,
        requester_id: &str,
        now: OffsetDateTime,
    ) -> Result<OffsetDateTime, DomainError> {
        if requester_id != self.host_id {
            return Err(DomainError::forbidden("Only the host can start."));
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::NotEnoughPlayers,
                format!("Need at least {MIN_PLAYERS} players to start."),
            ));
        }

        let started = *self.start_time.get_or_insert(now);
        self.touch(now);
        Ok(started)
    }

    /// Record `item_id` as the player's pick, replacing any earlier pick.
    ///
    /// Accepted in every phase. `rendered_image` only overwrites the stored
    /// image when it is present and non-empty.
    pub fn pick(
        &mut self,
        player_id: &str,
        item_id: &str,
        rendered_image: Option<String>,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if !self.players.contains_key(player_id) {
            return Err(player_not_found());
        }
        if !self.items.iter().any(|item| item.id == item_id) {
            return Err(DomainError::validation(
                ValidationKind::InvalidItem,
                "Invalid itemId.",
            ));
        }

        if let Some(player) = self.players.get_mut(player_id) {
            player.picked_item_id = Some(item_id.to_string());
            if let Some(image) = rendered_image.filter(|image| !image.is_empty()) {
                player.rendered_image = Some(image);
            }
        }
        self.touch(now);
        Ok(())
    }

    /// Record or replace `voter_id`'s vote. Accepted in every phase.
    pub fn vote(
        &mut self,
        voter_id: &str,
        target_id: &str,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if !self.players.contains_key(voter_id) {
            return Err(player_not_found());
        }
        if !self.players.contains_key(target_id) {
            return Err(DomainError::validation(
                ValidationKind::InvalidTarget,
                "Invalid vote target.",
            ));
        }
        if voter_id == target_id {
            return Err(DomainError::validation(
                ValidationKind::SelfVote,
                "Cannot vote for yourself.",
            ));
        }

        self.votes
            .insert(voter_id.to_string(), target_id.to_string());
        self.touch(now);
        Ok(())
    }

    /// Player-facing snapshot at `now`. Pure: no session field changes.
    pub fn project(&self, now: OffsetDateTime) -> SessionView {
        let state = compute_phase(self, now);
        let outcome = compute_winner(self, state.phase);

        SessionView {
            session_id: self.id.clone(),
            prompt: self.prompt.label.clone(),
            prompt_id: self.prompt.id.clone(),
            host_id: self.host_id.clone(),
            max_players: self.max_players,
            phase: state.phase,
            duration_seconds: self.duration_seconds,
            time_remaining: state.time_remaining,
            items: self.items.clone(),
            players: self.roster().into_iter().map(PlayerView::from).collect(),
            votes: self.votes.clone(),
            winner: outcome.winner,
            tie: outcome.tie,
        }
    }

    /// Store the derived values of `view` on the session.
    ///
    /// Returns the previously cached phase when it differs.
    pub fn cache_projection(&mut self, view: &SessionView) -> Option<Phase> {
        let previous = self.cached_phase;
        self.cached_phase = view.phase;
        self.cached_winner = view.winner.clone();
        self.cached_tie = view.tie;
        (previous != view.phase).then_some(previous)
    }

    /// Winner and tie flag recorded by the last projection.
    pub fn cached_outcome(&self) -> Outcome {
        Outcome {
            winner: self.cached_winner.clone(),
            tie: self.cached_tie,
        }
    }
}

fn player_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Player, "Player not found.")
}
