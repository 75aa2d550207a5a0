use std::path::PathBuf;

use clap::Parser;
use promptdock_app::StoragePaths;

/// Storage backend for the PromptDock desktop UI, speaking newline-delimited
/// JSON on stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "promptdock-ipc", version, about)]
pub struct Cli {
    /// Root data directory (document in `data/storage.json`, backups in `backups/`)
    #[arg(long, env = "PROMPTDOCK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Explicit path of the storage document; takes precedence over --data-dir
    #[arg(long, env = "PROMPTDOCK_STORAGE_PATH")]
    pub storage_path: Option<PathBuf>,

    /// Backup directory override
    #[arg(long, env = "PROMPTDOCK_BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,
}

impl Cli {
    pub fn storage_paths(&self) -> StoragePaths {
        let paths = match (&self.storage_path, &self.data_dir) {
            (Some(path), _) => StoragePaths::with_document_path(path),
            (None, Some(dir)) => StoragePaths::from_data_dir(dir),
            (None, None) => StoragePaths::default_location(),
        };

        match &self.backup_dir {
            Some(dir) => paths.backup_dir(dir),
            None => paths,
        }
    }
}
