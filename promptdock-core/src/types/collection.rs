//! Item kinds and collection name resolution

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::types::{AgentFields, McpFields, PromptFields};

/// Document key holding the groups collection.
pub const GROUPS_COLLECTION: &str = "groups";

/// Kind of item managed by the application
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Prompt template
    Prompt,
    /// MCP server configuration
    Mcp,
    /// Agent configuration
    Agent,
}

impl ItemKind {
    pub const ALL: [Self; 3] = [Self::Prompt, Self::Mcp, Self::Agent];

    /// Type name used by frontends (`prompt`, `mcp`, `agent`)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Mcp => "mcp",
            Self::Agent => "agent",
        }
    }

    /// Document key of the collection holding this kind
    #[must_use]
    pub fn collection_name(self) -> &'static str {
        match self {
            Self::Prompt => "prompts",
            Self::Mcp => "mcpConfigs",
            Self::Agent => "agentConfigs",
        }
    }

    /// Checks that the type-specific fields have the shape of this kind.
    ///
    /// Missing fields are fine (they take their defaults); present fields must
    /// have the right JSON type.
    pub fn validate_fields(self, fields: &Map<String, Value>) -> CoreResult<()> {
        let value = Value::Object(fields.clone());
        let result = match self {
            Self::Prompt => serde_json::from_value::<PromptFields>(value).map(drop),
            Self::Mcp => serde_json::from_value::<McpFields>(value).map(drop),
            Self::Agent => serde_json::from_value::<AgentFields>(value).map(drop),
        };
        result.map_err(|e| CoreError::ValidationError(format!("Invalid {self} fields: {e}")))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collection addressed by an item type name.
///
/// `prompt`, `mcp` and `agent` map to their fixed collections. Any other name
/// is used literally as the collection key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemCollection {
    Known(ItemKind),
    Custom(String),
}

impl ItemCollection {
    /// Resolves a caller-supplied type name.
    ///
    /// The `groups` key is rejected: it holds groups, not items.
    pub fn resolve(type_name: &str) -> CoreResult<Self> {
        if type_name.is_empty() {
            return Err(CoreError::ValidationError(
                "Item type cannot be empty".to_string(),
            ));
        }
        if type_name == GROUPS_COLLECTION {
            return Err(CoreError::ValidationError(
                "The groups collection is managed through group operations".to_string(),
            ));
        }

        let known = ItemKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == type_name || kind.collection_name() == type_name);

        Ok(match known {
            Some(kind) => Self::Known(kind),
            None => Self::Custom(type_name.to_string()),
        })
    }

    /// Document key of this collection
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Known(kind) => kind.collection_name(),
            Self::Custom(name) => name,
        }
    }

    /// Item kind, if this is one of the fixed collections
    #[must_use]
    pub fn kind(&self) -> Option<ItemKind> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Custom(_) => None,
        }
    }
}
