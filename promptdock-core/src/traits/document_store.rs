//! Document persistence abstract Trait

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::StorageDocument;

/// Storage document Trait
///
/// Platform implementation:
/// - Desktop / IPC: `JsonDocumentStore` (single JSON file + backup directory)
/// - Tests: in-memory mock
///
/// Implementations hold no locks across calls; callers serialize
/// read-modify-write cycles (see `ServiceContext`).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Prepare storage and backup locations and load the document.
    ///
    /// A missing or unreadable document is replaced by the default
    /// empty-collections document, which is persisted immediately.
    async fn initialize(&self) -> CoreResult<()>;

    /// Read the current document, refreshed from storage
    async fn read(&self) -> CoreResult<StorageDocument>;

    /// Replace the whole document
    ///
    /// # Arguments
    /// * `document` - the new document, persisted in full
    async fn write(&self, document: &StorageDocument) -> CoreResult<()>;

    /// Write a timestamped copy of the current document.
    ///
    /// # Returns
    /// * Location of the backup that was written
    async fn backup(&self) -> CoreResult<PathBuf>;

    /// Install a backup as the live document.
    ///
    /// # Arguments
    /// * `backup_path` - explicit backup file, or `None` for the most recent backup
    ///
    /// # Returns
    /// * The restored document, or the current one if no backup exists
    ///
    /// # Note
    /// The live document is only replaced after the backup parsed successfully.
    async fn restore(&self, backup_path: Option<&Path>) -> CoreResult<StorageDocument>;

    /// Location of the live document
    fn storage_path(&self) -> &Path;
}
