//! Error codes for the Fitcheck backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Fitcheck backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    /// Only the host may perform this operation
    Forbidden,

    // Request Validation
    /// Avatar is not one of the known variants
    InvalidAvatar,
    /// Item id is not part of the session catalog
    InvalidItem,
    /// Vote target is not a player of the session
    InvalidTarget,
    /// A player tried to vote for themselves
    SelfVote,
    /// Draft duration must be positive
    InvalidDuration,
    /// Capacity must allow at least two players
    InvalidMaxPlayers,
    /// General bad request error (missing fields, malformed JSON)
    BadRequest,

    // Resource Not Found
    /// Session id unknown or evicted
    SessionNotFound,
    /// Player id unknown within the session
    PlayerNotFound,
    /// Catalog produced no items for the session
    NoItemsFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Session already holds `maxPlayers` players
    SessionFull,
    /// Fewer than two players at start
    NotEnoughPlayers,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidAvatar => "INVALID_AVATAR",
            Self::InvalidItem => "INVALID_ITEM",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::SelfVote => "SELF_VOTE",
            Self::InvalidDuration => "INVALID_DURATION",
            Self::InvalidMaxPlayers => "INVALID_MAX_PLAYERS",
            Self::BadRequest => "BAD_REQUEST",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NoItemsFound => "NO_ITEMS_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::SessionFull => "SESSION_FULL",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
