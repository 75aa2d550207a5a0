//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// File system failure while reading or writing the live document or a backup
    #[error("Storage I/O error: {0}")]
    StorageIo(String),

    /// The live document cannot be parsed into the expected shape
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// A backup file cannot be parsed into the expected shape
    #[error("Corrupt backup {path}: {reason}")]
    CorruptBackup { path: String, reason: String },

    /// No item with this identifier in the collection
    #[error("Item not found: {collection}/{id}")]
    ItemNotFound { collection: String, id: String },

    /// No group with this identifier
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ItemNotFound { .. }
            | Self::GroupNotFound(_)
            | Self::ValidationError(_)
            | Self::CorruptBackup { .. } => true,
            Self::StorageIo(_) | Self::CorruptData(_) | Self::SerializationError(_) => false,
        }
    }

    /// Stable machine-readable code, used by frontends to classify failures.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageIo(_) => "STORAGE_IO",
            Self::CorruptData(_) => "CORRUPT_DATA",
            Self::CorruptBackup { .. } => "CORRUPT_BACKUP",
            Self::ItemNotFound { .. } | Self::GroupNotFound(_) => "NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION",
            Self::SerializationError(_) => "SERIALIZATION",
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
