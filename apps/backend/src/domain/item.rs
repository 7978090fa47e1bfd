use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A draftable catalog entry.
///
/// The coordinator only interprets `id`; render and store metadata supplied
/// by the catalog (`store`, `productUrl`, `renderStatus`, ...) is kept in
/// `extra` and round-trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image_url: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
            category: category.map(str::to_string),
            extra: Map::new(),
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.extra.get("status").and_then(Value::as_str)
    }

    /// Flag the item as draftable once it has been handed to a session.
    pub fn mark_ready(&mut self) {
        self.extra
            .insert("status".to_string(), Value::String("ready".to_string()));
    }
}
