//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ItemService, ServiceContext};
use crate::traits::DocumentStore;
use crate::types::{NewItem, StorageDocument};

// ===== MockDocumentStore =====

pub struct MockDocumentStore {
    document: RwLock<Option<StorageDocument>>,
    backups: RwLock<Vec<(PathBuf, StorageDocument)>>,
    /// 如果 Some，write 时返回此错误
    write_error: RwLock<Option<String>>,
    writes: AtomicUsize,
    path: PathBuf,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self {
            document: RwLock::new(None),
            backups: RwLock::new(Vec::new()),
            write_error: RwLock::new(None),
            writes: AtomicUsize::new(0),
            path: PathBuf::from("/mock/data/storage.json"),
        }
    }

    pub async fn set_write_error(&self, err: Option<String>) {
        *self.write_error.write().await = err;
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn initialize(&self) -> CoreResult<()> {
        let mut document = self.document.write().await;
        if document.is_none() {
            *document = Some(StorageDocument::default());
        }
        Ok(())
    }

    async fn read(&self) -> CoreResult<StorageDocument> {
        // let concurrent callers interleave between read and write
        tokio::task::yield_now().await;
        Ok(self.document.read().await.clone().unwrap_or_default())
    }

    async fn write(&self, document: &StorageDocument) -> CoreResult<()> {
        if let Some(ref msg) = *self.write_error.read().await {
            return Err(CoreError::StorageIo(msg.clone()));
        }
        *self.document.write().await = Some(document.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn backup(&self) -> CoreResult<PathBuf> {
        let document = self.read().await?;
        let mut backups = self.backups.write().await;
        let path = PathBuf::from(format!("/mock/backups/storage-{:04}.json", backups.len()));
        backups.push((path.clone(), document));
        Ok(path)
    }

    async fn restore(&self, backup_path: Option<&Path>) -> CoreResult<StorageDocument> {
        let candidate = {
            let backups = self.backups.read().await;
            match backup_path {
                Some(path) => Some(
                    backups
                        .iter()
                        .find(|(p, _)| p == path)
                        .map(|(_, doc)| doc.clone())
                        .ok_or_else(|| {
                            CoreError::StorageIo(format!("No such file: {}", path.display()))
                        })?,
                ),
                None => backups.last().map(|(_, doc)| doc.clone()),
            }
        };

        match candidate {
            Some(document) => {
                self.write(&document).await?;
                Ok(document)
            }
            None => self.read().await,
        }
    }

    fn storage_path(&self) -> &Path {
        &self.path
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> (Arc<ServiceContext>, Arc<MockDocumentStore>) {
    let store = Arc::new(MockDocumentStore::new());
    let ctx = Arc::new(ServiceContext::new(store.clone()));
    (ctx, store)
}

/// 创建测试用 `ItemService`
pub fn create_test_item_service() -> (ItemService, Arc<MockDocumentStore>) {
    let (ctx, store) = create_test_context();
    (ItemService::new(ctx), store)
}

/// Parses a create payload, panicking on malformed test input.
pub fn new_item(data: Value) -> NewItem {
    NewItem::from_value(data).unwrap()
}
