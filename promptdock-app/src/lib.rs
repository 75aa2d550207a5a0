//! Application bootstrap for PromptDock.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection),
//! `StoragePaths` (where data lives) and the JSON file adapter.

pub mod adapters;
pub mod config;

use std::sync::Arc;

use promptdock_core::error::{CoreError, CoreResult};
use promptdock_core::services::{BackupService, GroupService, ItemService, ServiceContext};
use promptdock_core::traits::DocumentStore;

pub use config::StoragePaths;

/// Application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds the storage adapter)
    pub ctx: Arc<ServiceContext>,
    /// Item service
    pub item_service: ItemService,
    /// Group service
    pub group_service: GroupService,
    /// Backup service
    pub backup_service: BackupService,
}

impl AppState {
    /// Prepare storage; must complete before the first request is served.
    pub async fn initialize(&self) -> CoreResult<()> {
        self.ctx.document_store().initialize().await?;
        log::info!(
            "Storage ready at {}",
            self.ctx.document_store().storage_path().display()
        );
        Ok(())
    }
}

/// Builder for constructing `AppState` with a platform-specific store.
///
/// # Required adapters
/// - `document_store`: how the storage document is persisted
pub struct AppStateBuilder {
    document_store: Option<Arc<dyn DocumentStore>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            document_store: None,
        }
    }

    #[must_use]
    pub fn document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.document_store = Some(store);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let document_store = self.document_store.ok_or_else(|| {
            CoreError::ValidationError("document_store is required".to_string())
        })?;

        let ctx = Arc::new(ServiceContext::new(document_store));

        Ok(AppState {
            item_service: ItemService::new(Arc::clone(&ctx)),
            group_service: GroupService::new(Arc::clone(&ctx)),
            backup_service: BackupService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
