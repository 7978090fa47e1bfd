//! Catalog provider: the draftable items a session is created with.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::item::Item;
use crate::domain::prompt::PromptPreset;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Source of catalog items. Implementations must be cheap to call; the
/// session service calls `items` once per create.
pub trait CatalogProvider: Send + Sync {
    fn items(&self) -> Vec<Item>;
}

/// Catalog held in memory, optionally loaded from a JSON file at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<Item>,
}

impl StaticCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a JSON array of items. A missing file yields an empty catalog.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            info!(path = %path.display(), "Catalog file not found; starting with an empty catalog");
            return Ok(Self::empty());
        }

        let raw = fs::read_to_string(path)?;
        let items: Vec<Item> = serde_json::from_str(&raw).map_err(|e| {
            AppError::config(format!("invalid catalog file {}: {e}", path.display()))
        })?;
        info!(path = %path.display(), count = items.len(), "Loaded catalog");
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogProvider for StaticCatalog {
    fn items(&self) -> Vec<Item> {
        self.items.clone()
    }
}

/// Pick the items for a new session.
///
/// Takes up to `per_category` items for each of the prompt's categories,
/// skipping repeated image URLs. When that yields nothing, the first `limit`
/// catalog items are used instead. Every returned item is marked ready.
pub fn select_items(
    catalog: &[Item],
    prompt: &PromptPreset,
    per_category: usize,
    limit: usize,
) -> Result<Vec<Item>, DomainError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected: Vec<Item> = Vec::new();

    for category in prompt.categories {
        let matches = catalog
            .iter()
            .filter(|item| item.category.as_deref() == Some(category.id));
        let mut taken = 0;
        for item in matches {
            if taken >= per_category {
                break;
            }
            if item.image_url.is_empty() || !seen.insert(item.image_url.as_str()) {
                continue;
            }
            selected.push(item.clone());
            taken += 1;
        }
    }

    if selected.is_empty() {
        selected = catalog.iter().take(limit).cloned().collect();
    }
    if selected.is_empty() {
        return Err(DomainError::not_found(
            NotFoundKind::CatalogItems,
            "No items found.",
        ));
    }

    for item in &mut selected {
        item.mark_ready();
    }
    Ok(selected)
}
