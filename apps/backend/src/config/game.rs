//! Game tuning and server settings loaded from the environment.
//!
//! Every variable is optional. A missing or unparseable value falls back to
//! its default rather than failing startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::session::{MAX_DURATION_SECONDS, MIN_PLAYERS};

pub const DEFAULT_DURATION_SECONDS: i64 = 90;
pub const DEFAULT_ITEM_LIMIT: usize = 6;
pub const DEFAULT_PER_CATEGORY: usize = 3;
pub const DEFAULT_GAME_TTL_SECONDS: i64 = 3600;
/// Larger TTLs are clamped to one week.
pub const MAX_GAME_TTL_SECONDS: i64 = 7 * 24 * 3600;
pub const DEFAULT_MAX_PLAYERS: usize = 6;
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Draft length used when create does not pass one.
    pub duration_seconds: i64,
    /// Fallback item count when no catalog item matches a prompt category.
    pub item_limit: usize,
    pub per_category: usize,
    /// Inactivity window after which a session is evicted.
    pub game_ttl_seconds: i64,
    pub max_players: usize,
    /// Background sweep period; 0 disables the sweeper.
    pub sweep_interval_seconds: u64,
    pub catalog_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_DURATION_SECONDS,
            item_limit: DEFAULT_ITEM_LIMIT,
            per_category: DEFAULT_PER_CATEGORY,
            game_ttl_seconds: DEFAULT_GAME_TTL_SECONDS,
            max_players: DEFAULT_MAX_PLAYERS,
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
            catalog_path: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let duration_seconds = parsed(&lookup, "MULTI_DURATION_SECONDS")
            .filter(|secs: &i64| (1..=MAX_DURATION_SECONDS).contains(secs))
            .unwrap_or(defaults.duration_seconds);
        let item_limit = parsed(&lookup, "MULTI_ITEM_LIMIT")
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.item_limit);
        let per_category = parsed(&lookup, "MULTI_PER_CATEGORY")
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.per_category);
        let game_ttl_seconds = parsed(&lookup, "MULTI_GAME_TTL_SECONDS")
            .filter(|secs: &i64| *secs > 0)
            .map(|secs| secs.min(MAX_GAME_TTL_SECONDS))
            .unwrap_or(defaults.game_ttl_seconds);
        let max_players = parsed::<usize>(&lookup, "MULTI_MAX_PLAYERS")
            .unwrap_or(defaults.max_players)
            .max(MIN_PLAYERS);
        let sweep_interval_seconds = parsed::<u64>(&lookup, "MULTI_SWEEP_INTERVAL_SECONDS")
            .unwrap_or(defaults.sweep_interval_seconds);

        let catalog_path = lookup("CATALOG_PATH")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);
        let host = lookup("BACKEND_HOST")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.host);
        let port = parsed::<u16>(&lookup, "BACKEND_PORT").unwrap_or(defaults.port);

        Self {
            duration_seconds,
            item_limit,
            per_category,
            game_ttl_seconds,
            max_players,
            sweep_interval_seconds,
            catalog_path,
            host,
            port,
        }
    }

    pub fn game_ttl(&self) -> time::Duration {
        time::Duration::seconds(self.game_ttl_seconds)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Trimmed value of `key` parsed as `T`, or `None` when absent or unparseable.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|raw| raw.trim().parse().ok())
}
