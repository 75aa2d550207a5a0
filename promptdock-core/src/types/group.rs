//! Group type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::types::ItemKind;

/// Named bucket organizing items of one kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group ID (UUID)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Creation time
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
    /// Kind of items this group organizes
    pub item_type: ItemKind,
}

/// Payload for creating a group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub item_type: ItemKind,
}

impl NewGroup {
    /// Parses a create payload coming from a frontend.
    pub fn from_value(data: Value) -> CoreResult<Self> {
        serde_json::from_value(data)
            .map_err(|e| CoreError::ValidationError(format!("Invalid group data: {e}")))
    }

    /// Builds the stored group with its generated identifier and timestamps.
    #[must_use]
    pub fn into_group(self, id: String, now: DateTime<Utc>) -> Group {
        Group {
            id,
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
            item_type: self.item_type,
        }
    }
}
