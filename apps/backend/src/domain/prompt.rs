//! Themed prompts a session is played under.

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// A draft category inside a prompt; `id` matches `Item::category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPreset {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub categories: &'static [CategoryPreset],
}

pub const PROMPT_PRESETS: &[PromptPreset] = &[
    PromptPreset {
        id: "summer",
        label: "Summer Outfit",
        categories: &[
            CategoryPreset { id: "dress", label: "Dresses" },
            CategoryPreset { id: "shoes", label: "Shoes" },
            CategoryPreset { id: "accessory", label: "Accessories" },
        ],
    },
    PromptPreset {
        id: "fall",
        label: "Fall Breeze",
        categories: &[
            CategoryPreset { id: "outerwear", label: "Outerwear" },
            CategoryPreset { id: "shoes", label: "Shoes" },
            CategoryPreset { id: "accessory", label: "Accessories" },
        ],
    },
    PromptPreset {
        id: "school",
        label: "High School",
        categories: &[
            CategoryPreset { id: "top", label: "Tops" },
            CategoryPreset { id: "shoes", label: "Shoes" },
            CategoryPreset { id: "accessory", label: "Accessories" },
        ],
    },
];

/// The prompt a session was created with, as shown to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub label: String,
}

impl From<&PromptPreset> for Prompt {
    fn from(preset: &PromptPreset) -> Self {
        Self {
            id: preset.id.to_string(),
            label: preset.label.to_string(),
        }
    }
}

/// Look a preset up by id first, then by case-insensitive label.
pub fn find_prompt(id: Option<&str>, label: Option<&str>) -> Option<&'static PromptPreset> {
    if let Some(id) = id {
        if let Some(preset) = PROMPT_PRESETS.iter().find(|p| p.id == id) {
            return Some(preset);
        }
    }
    let wanted = label?.trim().to_lowercase();
    PROMPT_PRESETS
        .iter()
        .find(|p| p.label.to_lowercase() == wanted)
}

/// Like [`find_prompt`], but falls back to a random preset.
pub fn choose_prompt(id: Option<&str>, label: Option<&str>) -> &'static PromptPreset {
    find_prompt(id, label).unwrap_or_else(|| {
        PROMPT_PRESETS
            .choose(&mut rand::rng())
            .unwrap_or(&PROMPT_PRESETS[0])
    })
}
