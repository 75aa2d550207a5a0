//! The storage document: every collection the application persists

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Group, Item, ItemCollection, ItemKind};

/// The single persisted document.
///
/// The four fixed collections are always serialized, possibly empty. Missing
/// keys read as empty collections. Collections created under a literal type
/// name are kept in `extra_collections`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageDocument {
    #[serde(default)]
    pub prompts: Vec<Item>,
    #[serde(default)]
    pub mcp_configs: Vec<Item>,
    #[serde(default)]
    pub agent_configs: Vec<Item>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(flatten)]
    pub extra_collections: BTreeMap<String, Vec<Item>>,
}

impl StorageDocument {
    /// Items of a collection, `None` if a literal collection does not exist yet
    #[must_use]
    pub fn collection(&self, collection: &ItemCollection) -> Option<&Vec<Item>> {
        match collection {
            ItemCollection::Known(kind) => Some(self.known(*kind)),
            ItemCollection::Custom(name) => self.extra_collections.get(name),
        }
    }

    /// Mutable items of a collection, creating a literal collection if absent
    pub fn collection_mut(&mut self, collection: &ItemCollection) -> &mut Vec<Item> {
        match collection {
            ItemCollection::Known(kind) => self.known_mut(*kind),
            ItemCollection::Custom(name) => {
                self.extra_collections.entry(name.clone()).or_default()
            }
        }
    }

    fn known(&self, kind: ItemKind) -> &Vec<Item> {
        match kind {
            ItemKind::Prompt => &self.prompts,
            ItemKind::Mcp => &self.mcp_configs,
            ItemKind::Agent => &self.agent_configs,
        }
    }

    fn known_mut(&mut self, kind: ItemKind) -> &mut Vec<Item> {
        match kind {
            ItemKind::Prompt => &mut self.prompts,
            ItemKind::Mcp => &mut self.mcp_configs,
            ItemKind::Agent => &mut self.agent_configs,
        }
    }

    /// Total number of records across all collections
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.prompts.len()
            + self.mcp_configs.len()
            + self.agent_configs.len()
            + self.groups.len()
            + self.extra_collections.values().map(Vec::len).sum::<usize>()
    }
}
