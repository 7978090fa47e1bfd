//! Player-facing snapshot of a session, as returned by every endpoint.
//!
//! There is no hidden information in the game, so the view carries every
//! player's pick and every vote.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::avatar::Avatar;
use crate::domain::item::Item;
use crate::domain::phase::Phase;
use crate::domain::session::{Player, PlayerId, SessionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub avatar: Avatar,
    pub picked_item_id: Option<String>,
    pub rendered_image: Option<String>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            avatar: player.avatar,
            picked_item_id: player.picked_item_id.clone(),
            rendered_image: player.rendered_image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    #[serde(rename = "gameId")]
    pub session_id: SessionId,
    /// Prompt label, e.g. "Summer Outfit".
    pub prompt: String,
    pub prompt_id: String,
    pub host_id: PlayerId,
    pub max_players: usize,
    pub phase: Phase,
    pub duration_seconds: i64,
    /// Whole seconds left in the draft; `null` until the game starts.
    pub time_remaining: Option<i64>,
    pub items: Vec<Item>,
    /// Join order, host first.
    pub players: Vec<PlayerView>,
    /// Voter id to target id.
    pub votes: BTreeMap<PlayerId, PlayerId>,
    pub winner: Option<PlayerId>,
    pub tie: bool,
}

impl SessionView {
    pub fn player(&self, id: &str) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }
}
