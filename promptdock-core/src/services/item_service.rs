//! Item management service
//!
//! Generic CRUD over the item collections (prompts, mcpConfigs, agentConfigs
//! and literal collections), addressed by type name.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::services::{fresh_id, shallow_merge, ServiceContext};
use crate::types::{Item, ItemCollection, NewItem};
use crate::utils::datetime;

/// Item management service
pub struct ItemService {
    ctx: Arc<ServiceContext>,
}

impl ItemService {
    /// Create an item service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List every item of a type.
    ///
    /// An absent collection reads as empty; the document is not modified.
    pub async fn get_all(&self, item_type: &str) -> CoreResult<Vec<Item>> {
        let collection = ItemCollection::resolve(item_type)?;
        let document = self.ctx.document_store().read().await?;
        Ok(document
            .collection(&collection)
            .cloned()
            .unwrap_or_default())
    }

    /// Get an item based on ID
    pub async fn get_by_id(&self, item_type: &str, id: &str) -> CoreResult<Option<Item>> {
        let items = self.get_all(item_type).await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    /// Create an item with a generated ID and timestamps
    pub async fn create(&self, item_type: &str, data: NewItem) -> CoreResult<Item> {
        let collection = ItemCollection::resolve(item_type)?;
        if let Some(kind) = collection.kind() {
            kind.validate_fields(&data.fields)?;
        }

        let item = self
            .ctx
            .mutate(|document| {
                let items = document.collection_mut(&collection);
                let id = fresh_id(|candidate| items.iter().any(|item| item.id == candidate));
                let item = data.into_item(id, datetime::now());
                items.push(item.clone());
                Ok(item)
            })
            .await?;

        log::info!("Created item {} in {}", item.id, collection.name());
        Ok(item)
    }

    /// Update an item with a shallow merge of `updates`.
    ///
    /// `id` and `createdAt` keep their stored values; `updatedAt` is reset.
    pub async fn update(
        &self,
        item_type: &str,
        id: &str,
        updates: &Map<String, Value>,
    ) -> CoreResult<Item> {
        let collection = ItemCollection::resolve(item_type)?;

        let item = self
            .ctx
            .mutate(|document| {
                let items = document.collection_mut(&collection);
                let index = items
                    .iter()
                    .position(|item| item.id == id)
                    .ok_or_else(|| CoreError::ItemNotFound {
                        collection: collection.name().to_string(),
                        id: id.to_string(),
                    })?;

                let mut updated = shallow_merge(&items[index], updates)?;
                if let Some(kind) = collection.kind() {
                    kind.validate_fields(&updated.fields)?;
                }
                updated.updated_at = datetime::now();

                items[index] = updated.clone();
                Ok(updated)
            })
            .await?;

        log::info!("Updated item {id} in {}", collection.name());
        Ok(item)
    }

    /// Delete an item.
    ///
    /// The document is persisted whether or not the item existed.
    ///
    /// # Returns
    /// * `true` - the item existed and was removed
    /// * `false` - no item with this ID
    pub async fn delete(&self, item_type: &str, id: &str) -> CoreResult<bool> {
        let collection = ItemCollection::resolve(item_type)?;

        let removed = self
            .ctx
            .mutate(|document| {
                let items = document.collection_mut(&collection);
                let original_len = items.len();
                if let Some(index) = items.iter().position(|item| item.id == id) {
                    items.remove(index);
                }
                Ok(items.len() < original_len)
            })
            .await?;

        if removed {
            log::info!("Deleted item {id} from {}", collection.name());
        } else {
            log::debug!("Delete: no item {id} in {}", collection.name());
        }
        Ok(removed)
    }

    /// List the items whose `groupId` equals `group_id`, in stored order
    pub async fn get_by_group(&self, item_type: &str, group_id: &str) -> CoreResult<Vec<Item>> {
        let items = self.get_all(item_type).await?;
        Ok(items
            .into_iter()
            .filter(|item| item.group_id.as_deref() == Some(group_id))
            .collect())
    }
}
