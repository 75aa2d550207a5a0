//! Storage locations

use std::path::{Path, PathBuf};

/// Directory name under the platform data directory
pub const APP_DIR_NAME: &str = "promptdock";

/// Where the live document and its backups are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    /// The live JSON document
    pub document_path: PathBuf,
    /// Directory holding timestamped backups
    pub backup_dir: PathBuf,
}

impl StoragePaths {
    /// `<dir>/data/storage.json` with backups in `<dir>/backups`
    #[must_use]
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            document_path: dir.join("data").join("storage.json"),
            backup_dir: dir.join("backups"),
        }
    }

    /// An explicit document path; backups go to a `backups` directory next to
    /// the directory containing the document.
    #[must_use]
    pub fn with_document_path(path: impl Into<PathBuf>) -> Self {
        let document_path = path.into();
        let parent = document_path.parent().unwrap_or_else(|| Path::new(""));
        let base = parent.parent().unwrap_or(parent);
        Self {
            backup_dir: base.join("backups"),
            document_path,
        }
    }

    /// 平台数据目录 (e.g. `~/.local/share/promptdock`)
    #[must_use]
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);
        Self::from_data_dir(dir)
    }

    #[must_use]
    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }
}
