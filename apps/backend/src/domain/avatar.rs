use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Base figure a player's picks are rendered onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Avatar {
    #[default]
    Girl,
    Boy,
}

impl Avatar {
    pub const ALL: [Avatar; 2] = [Avatar::Girl, Avatar::Boy];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Avatar::Girl => "girl",
            Avatar::Boy => "boy",
        }
    }

    /// Resolve an optional request value: absent means the default avatar,
    /// anything present must name a known variant.
    pub fn resolve(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw {
            None => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for Avatar {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|avatar| avatar.as_str() == s.trim())
            .ok_or_else(|| DomainError::validation(ValidationKind::InvalidAvatar, "Invalid avatar."))
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
