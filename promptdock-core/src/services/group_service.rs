//! Group management service

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::services::{fresh_id, shallow_merge, ServiceContext};
use crate::types::{Group, NewGroup};
use crate::utils::datetime;

/// Group management service
///
/// Deleting a group leaves `groupId` references on items untouched.
pub struct GroupService {
    ctx: Arc<ServiceContext>,
}

impl GroupService {
    /// Create a group service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List all groups
    pub async fn get_all(&self) -> CoreResult<Vec<Group>> {
        Ok(self.ctx.document_store().read().await?.groups)
    }

    /// Get a group based on ID
    pub async fn get_by_id(&self, id: &str) -> CoreResult<Option<Group>> {
        let groups = self.get_all().await?;
        Ok(groups.into_iter().find(|group| group.id == id))
    }

    /// Create a group
    pub async fn create(&self, data: NewGroup) -> CoreResult<Group> {
        let group = self
            .ctx
            .mutate(|document| {
                let id = fresh_id(|candidate| {
                    document.groups.iter().any(|group| group.id == candidate)
                });
                let group = data.into_group(id, datetime::now());
                document.groups.push(group.clone());
                Ok(group)
            })
            .await?;

        log::info!("Created {} group {}", group.item_type, group.id);
        Ok(group)
    }

    /// Update a group with a shallow merge of `updates`
    pub async fn update(&self, id: &str, updates: &Map<String, Value>) -> CoreResult<Group> {
        let group = self
            .ctx
            .mutate(|document| {
                let index = document
                    .groups
                    .iter()
                    .position(|group| group.id == id)
                    .ok_or_else(|| CoreError::GroupNotFound(id.to_string()))?;

                let mut updated = shallow_merge(&document.groups[index], updates)?;
                updated.updated_at = datetime::now();

                document.groups[index] = updated.clone();
                Ok(updated)
            })
            .await?;

        log::info!("Updated group {id}");
        Ok(group)
    }

    /// Delete a group
    ///
    /// # Returns
    /// * `true` - the group existed and was removed
    /// * `false` - no group with this ID
    pub async fn delete(&self, id: &str) -> CoreResult<bool> {
        let removed = self
            .ctx
            .mutate(|document| {
                let original_len = document.groups.len();
                document.groups.retain(|group| group.id != id);
                Ok(document.groups.len() < original_len)
            })
            .await?;

        if removed {
            log::info!("Deleted group {id}");
        }
        Ok(removed)
    }
}
