//! 业务逻辑服务层

mod backup_service;
mod group_service;
mod item_service;

pub use backup_service::BackupService;
pub use group_service::GroupService;
pub use item_service::ItemService;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::{CoreError, CoreResult};
use crate::traits::DocumentStore;
use crate::types::{StorageDocument, RESERVED_KEYS};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。
/// Every read-modify-write cycle goes through [`ServiceContext::mutate`], which
/// serializes them on one store instance.
pub struct ServiceContext {
    /// 文档存储
    document_store: Arc<dyn DocumentStore>,
    /// Held for the whole load → mutate → persist cycle
    write_lock: Mutex<()>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(document_store: Arc<dyn DocumentStore>) -> Self {
        Self {
            document_store,
            write_lock: Mutex::new(()),
        }
    }

    /// 获取文档存储
    #[must_use]
    pub fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.document_store
    }

    /// Blocks other mutations until the guard is dropped.
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Loads the whole document, applies `apply`, and persists the result.
    ///
    /// Nothing is written when `apply` fails.
    pub(crate) async fn mutate<T, F>(&self, apply: F) -> CoreResult<T>
    where
        F: FnOnce(&mut StorageDocument) -> CoreResult<T> + Send,
        T: Send,
    {
        let _guard = self.lock_writes().await;
        let mut document = self.document_store.read().await?;
        let output = apply(&mut document)?;
        self.document_store.write(&document).await?;
        Ok(output)
    }
}

/// Generates a UUID v4 for which `is_taken` returns `false`.
pub(crate) fn fresh_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if !is_taken(&id) {
            return id;
        }
        log::warn!("Generated identifier {id} already in use, retrying");
    }
}

/// Shallow-merges `updates` onto `record`.
///
/// Top-level keys of `updates` replace those of the record; `id`,
/// `createdAt` and `updatedAt` are never taken from `updates`.
pub(crate) fn shallow_merge<T>(record: &T, updates: &Map<String, Value>) -> CoreResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(mut merged) =
        serde_json::to_value(record).map_err(|e| CoreError::SerializationError(e.to_string()))?
    else {
        return Err(CoreError::SerializationError(
            "Stored record is not a JSON object".to_string(),
        ));
    };

    for (key, value) in updates {
        if RESERVED_KEYS.contains(&key.as_str()) {
            log::debug!("Ignoring reserved key in update: {key}");
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(merged))
        .map_err(|e| CoreError::ValidationError(format!("Invalid update: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Group, ItemKind, NewGroup};
    use serde_json::json;

    fn sample_group() -> Group {
        NewGroup {
            name: "Writing".to_string(),
            description: String::new(),
            item_type: ItemKind::Prompt,
        }
        .into_group("g-1".to_string(), crate::utils::datetime::now())
    }

    #[test]
    fn shallow_merge_replaces_top_level_keys() {
        let group = sample_group();
        let updates = json!({ "name": "Drafts", "description": "wip" });
        let merged = shallow_merge(&group, updates.as_object().unwrap()).unwrap();
        assert_eq!(merged.name, "Drafts");
        assert_eq!(merged.description, "wip");
        assert_eq!(merged.item_type, ItemKind::Prompt);
    }

    #[test]
    fn shallow_merge_ignores_reserved_keys() {
        let group = sample_group();
        let updates = json!({ "id": "forged", "createdAt": "2000-01-01T00:00:00Z" });
        let merged = shallow_merge(&group, updates.as_object().unwrap()).unwrap();
        assert_eq!(merged.id, "g-1");
        assert_eq!(merged.created_at, group.created_at);
    }

    #[test]
    fn shallow_merge_rejects_wrong_types() {
        let group = sample_group();
        let updates = json!({ "name": 7 });
        let result = shallow_merge(&group, updates.as_object().unwrap());
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn fresh_id_avoids_existing() {
        let existing = ["a".to_string(), "b".to_string()];
        let id = fresh_id(|candidate| existing.iter().any(|used| used == candidate));
        assert!(!existing.contains(&id));
        assert_eq!(id.len(), 36);
    }
}
