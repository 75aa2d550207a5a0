//! Item type definitions (prompts, MCP configurations, agent configurations)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// Keys owned by the storage layer; callers cannot set them.
pub const RESERVED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// A stored record of the prompts, mcpConfigs or agentConfigs collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Item ID (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Creation time
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
    /// Group this item belongs to (not checked against the groups collection)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Type-specific fields (`content`, `serverName`, `model`, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Reads the type-specific fields through a typed view such as [`PromptFields`].
    pub fn fields_as<T: DeserializeOwned>(&self) -> CoreResult<T> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| CoreError::SerializationError(e.to_string()))
    }
}

/// Payload for creating an item: everything except the generated fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NewItem {
    /// Parses a create payload coming from a frontend.
    ///
    /// Generated keys (`id`, `createdAt`, `updatedAt`) in the payload are dropped.
    pub fn from_value(data: Value) -> CoreResult<Self> {
        let mut item: Self = serde_json::from_value(data)
            .map_err(|e| CoreError::ValidationError(format!("Invalid item data: {e}")))?;
        for key in RESERVED_KEYS {
            item.fields.remove(key);
        }
        Ok(item)
    }

    /// Builds the stored item with its generated identifier and timestamps.
    #[must_use]
    pub fn into_item(self, id: String, now: DateTime<Utc>) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
            group_id: self.group_id,
            tags: self.tags,
            fields: self.fields,
        }
    }
}

/// Prompt-specific fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFields {
    #[serde(default)]
    pub content: String,
    /// Placeholder name -> default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// MCP server configuration fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McpFields {
    #[serde(default)]
    pub server_name: String,
    /// Server launch configuration, stored as-is
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Agent configuration fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentFields {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub settings: Map<String, Value>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored_prompt() -> Value {
        json!({
            "id": "p-1",
            "name": "Greet",
            "description": "",
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-02T00:00:00.000Z",
            "groupId": "g-1",
            "content": "Hello {{name}}",
            "variables": { "name": "world" }
        })
    }

    #[test]
    fn type_specific_fields_land_in_field_bag() {
        let item: Item = serde_json::from_value(stored_prompt()).unwrap();
        assert_eq!(item.group_id.as_deref(), Some("g-1"));
        assert_eq!(item.fields["content"], "Hello {{name}}");
        assert!(!item.fields.contains_key("id"));
    }

    #[test]
    fn serializes_back_to_the_same_shape() {
        let item: Item = serde_json::from_value(stored_prompt()).unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap(), stored_prompt());
    }

    #[test]
    fn typed_view_reads_prompt_fields() {
        let item: Item = serde_json::from_value(stored_prompt()).unwrap();
        let prompt: PromptFields = item.fields_as().unwrap();
        assert_eq!(prompt.content, "Hello {{name}}");
        assert_eq!(
            prompt.variables.unwrap().get("name").map(String::as_str),
            Some("world")
        );
        assert!(prompt.template.is_none());
    }

    #[test]
    fn mcp_fields_default_to_enabled() {
        let item: Item = serde_json::from_value(json!({
            "id": "m-1",
            "name": "fs",
            "createdAt": 1_700_000_000_000_i64,
            "updatedAt": 1_700_000_000_000_i64,
            "serverName": "filesystem"
        }))
        .unwrap();
        let mcp: McpFields = item.fields_as().unwrap();
        assert!(mcp.enabled);
        assert_eq!(mcp.server_name, "filesystem");
        assert!(mcp.config.is_empty());
    }

    #[test]
    fn new_item_drops_generated_keys() {
        let new_item = NewItem::from_value(json!({
            "id": "forged",
            "createdAt": "1999-01-01T00:00:00Z",
            "name": "Greet",
            "content": "Hello"
        }))
        .unwrap();
        assert_eq!(new_item.description, "");
        assert!(!new_item.fields.contains_key("id"));
        assert!(!new_item.fields.contains_key("createdAt"));
        assert_eq!(new_item.fields["content"], "Hello");
    }

    #[test]
    fn new_item_requires_name() {
        let result = NewItem::from_value(json!({ "description": "nameless" }));
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }
}
