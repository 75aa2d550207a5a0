//! PromptDock Core Library
//!
//! Provides the data-access layer for the PromptDock desktop application:
//! - Item management for prompts, MCP configurations and agent configurations (Item Service)
//! - Group management (Group Service)
//! - Backup and restore of the storage document (Backup Service)
//!
//! Persistence is abstracted behind the [`DocumentStore`] trait so frontends
//! can inject a file-backed store or an in-memory one for tests.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{BackupService, GroupService, ItemService, ServiceContext};
pub use traits::DocumentStore;
