//! Backup and restore of the storage document

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::StorageDocument;

/// 备份与恢复服务
pub struct BackupService {
    ctx: Arc<ServiceContext>,
}

impl BackupService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Write a timestamped backup of the current document
    pub async fn backup(&self) -> CoreResult<PathBuf> {
        let _guard = self.ctx.lock_writes().await;
        let path = self.ctx.document_store().backup().await?;
        log::info!("Backup written to {}", path.display());
        Ok(path)
    }

    /// Restore an explicit backup, or the most recent one when `backup_path` is `None`
    pub async fn restore(&self, backup_path: Option<&Path>) -> CoreResult<StorageDocument> {
        let _guard = self.ctx.lock_writes().await;
        let document = self.ctx.document_store().restore(backup_path).await?;
        log::info!(
            "Storage restored ({} records)",
            document.record_count()
        );
        Ok(document)
    }

    /// Location of the live document
    #[must_use]
    pub fn storage_path(&self) -> &Path {
        self.ctx.document_store().storage_path()
    }
}
