//! List record, creation draft and update patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ListId, ValidationError, ValidationResult};

/// Default accent color assigned when a draft omits one.
pub const DEFAULT_LIST_COLOR: &str = "#6366f1";
/// Default symbolic icon name assigned when a draft omits one.
pub const DEFAULT_LIST_ICON: &str = "Folder";

/// Canonical list record. Tasks reference it weakly via `Task::list_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_LIST_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_LIST_ICON.to_string()
}

impl List {
    /// Merges a patch onto this record, later fields winning.
    pub fn apply(&mut self, patch: ListPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
    }
}

/// Creation payload; `color`/`icon` fall back to the defaults above.
#[derive(Debug, Clone, Default)]
pub struct NewList {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewList {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    /// Builds the stored record with a store-assigned id.
    pub fn into_list(self, id: ListId, now: DateTime<Utc>) -> List {
        List {
            id,
            name: self.name,
            color: self.color.unwrap_or_else(default_color),
            icon: self.icon.unwrap_or_else(default_icon),
            created_at: now,
        }
    }
}

/// Explicit partial update for a list.
#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl ListPatch {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
        }
        Ok(())
    }
}
