//! 文档存储
//!
//! 使用单个 JSON 文件存储全部数据，备份写入独立目录
//! 实现 promptdock-core 的 DocumentStore trait

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use promptdock_core::traits::DocumentStore;
use promptdock_core::types::StorageDocument;
use promptdock_core::utils::datetime;
use promptdock_core::{CoreError, CoreResult};
use tokio::fs;
use tokio::sync::RwLock;

use crate::config::StoragePaths;

const BACKUP_PREFIX: &str = "storage-";
const BACKUP_SUFFIX: &str = ".json";

/// 基于 JSON 文件的文档存储
pub struct JsonDocumentStore {
    paths: StoragePaths,
    /// 内存缓存
    cache: RwLock<Option<StorageDocument>>,
}

impl JsonDocumentStore {
    #[must_use]
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            cache: RwLock::new(None),
        }
    }

    /// Backup directory in use
    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.paths.backup_dir
    }

    /// 确保目录存在
    async fn ensure_dir(dir: &Path) -> CoreResult<()> {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| storage_error("create directory", dir, &e))?;
        }
        Ok(())
    }

    /// 从文件加载文档，文件不存在时返回 `None`
    async fn load_from_file(&self) -> CoreResult<Option<StorageDocument>> {
        let path = &self.paths.document_path;

        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("read", path, &e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| CoreError::CorruptData(format!("{}: {e}", path.display())))
    }

    /// 保存文档到文件（先写临时文件再重命名）
    async fn save_to_file(&self, document: &StorageDocument) -> CoreResult<()> {
        let path = &self.paths.document_path;
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent).await?;
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        let tmp_path = temp_path_for(path);
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| storage_error("write", &tmp_path, &e))?;
        fs::rename(&tmp_path, path)
            .await
            .map_err(|e| storage_error("replace", path, &e))?;

        Ok(())
    }

    /// Copies an unreadable live file aside before it gets replaced.
    async fn preserve_corrupt_file(&self) -> CoreResult<PathBuf> {
        Self::ensure_dir(&self.paths.backup_dir).await?;
        let target = self
            .paths
            .backup_dir
            .join(format!("corrupt-{}.json", file_stamp(&datetime::now())));
        fs::copy(&self.paths.document_path, &target)
            .await
            .map_err(|e| storage_error("copy", &target, &e))?;
        Ok(target)
    }

    /// Lexicographically greatest `storage-*.json` in the backup directory
    async fn latest_backup(&self) -> CoreResult<Option<PathBuf>> {
        let dir = &self.paths.backup_dir;
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("list", dir, &e)),
        };

        let mut latest: Option<String> = None;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| storage_error("list", dir, &e))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_backup_file_name(&name) {
                continue;
            }
            if latest.as_ref().is_none_or(|current| name > *current) {
                latest = Some(name);
            }
        }

        Ok(latest.map(|name| dir.join(name)))
    }
}

#[async_trait]
impl DocumentStore for JsonDocumentStore {
    async fn initialize(&self) -> CoreResult<()> {
        if let Some(parent) = self.paths.document_path.parent() {
            Self::ensure_dir(parent).await?;
        }
        Self::ensure_dir(&self.paths.backup_dir).await?;

        let document = match self.load_from_file().await {
            Ok(Some(document)) => {
                log::debug!(
                    "Loaded {} records from {}",
                    document.record_count(),
                    self.paths.document_path.display()
                );
                *self.cache.write().await = Some(document);
                return Ok(());
            }
            Ok(None) => {
                log::info!(
                    "No storage file at {}, creating default document",
                    self.paths.document_path.display()
                );
                StorageDocument::default()
            }
            Err(CoreError::CorruptData(reason)) => {
                let preserved = self.preserve_corrupt_file().await?;
                log::warn!(
                    "Storage file unreadable ({reason}), copied to {} and replaced with default document",
                    preserved.display()
                );
                StorageDocument::default()
            }
            Err(e) => return Err(e),
        };

        self.write(&document).await
    }

    async fn read(&self) -> CoreResult<StorageDocument> {
        match self.load_from_file().await? {
            Some(document) => {
                *self.cache.write().await = Some(document.clone());
                Ok(document)
            }
            None => Ok(self.cache.read().await.clone().unwrap_or_default()),
        }
    }

    async fn write(&self, document: &StorageDocument) -> CoreResult<()> {
        self.save_to_file(document).await?;
        *self.cache.write().await = Some(document.clone());
        Ok(())
    }

    async fn backup(&self) -> CoreResult<PathBuf> {
        let document = self.read().await?;
        Self::ensure_dir(&self.paths.backup_dir).await?;

        let path = self.paths.backup_dir.join(backup_file_name(&datetime::now()));
        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        fs::write(&path, content)
            .await
            .map_err(|e| storage_error("write", &path, &e))?;

        Ok(path)
    }

    async fn restore(&self, backup_path: Option<&Path>) -> CoreResult<StorageDocument> {
        let path = match backup_path {
            Some(path) => path.to_path_buf(),
            None => match self.latest_backup().await? {
                Some(path) => path,
                None => {
                    log::info!("No backups found, keeping current document");
                    return self.read().await;
                }
            },
        };

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| storage_error("read", &path, &e))?;
        let document: StorageDocument =
            serde_json::from_str(&content).map_err(|e| CoreError::CorruptBackup {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        self.write(&document).await?;
        log::info!("Restored storage from {}", path.display());
        Ok(document)
    }

    fn storage_path(&self) -> &Path {
        &self.paths.document_path
    }
}

fn storage_error(action: &str, path: &Path, err: &std::io::Error) -> CoreError {
    CoreError::StorageIo(format!("Failed to {action} {}: {err}", path.display()))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// `2025-01-01T12:00:00.000Z` -> `2025-01-01T12-00-00-000Z`
fn file_stamp(at: &DateTime<Utc>) -> String {
    datetime::format(at).replace([':', '.'], "-")
}

fn backup_file_name(at: &DateTime<Utc>) -> String {
    format!("{BACKUP_PREFIX}{}{BACKUP_SUFFIX}", file_stamp(at))
}

fn is_backup_file_name(name: &str) -> bool {
    name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn backup_name_format() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(backup_file_name(&at), "storage-2025-01-01T12-00-00-000Z.json");
    }

    #[test]
    fn backup_names_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2025, 9, 30, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        assert!(backup_file_name(&earlier) < backup_file_name(&later));
    }

    #[test]
    fn corrupt_copies_are_not_restore_candidates() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let corrupt = format!("corrupt-{}.json", file_stamp(&at));
        assert!(!is_backup_file_name(&corrupt));
        assert!(!is_backup_file_name("storage-notes.txt"));
        assert!(is_backup_file_name(&backup_file_name(&at)));
    }

    #[test]
    fn temp_file_is_a_sibling() {
        let tmp = temp_path_for(Path::new("/data/storage.json"));
        assert_eq!(tmp, PathBuf::from("/data/storage.json.tmp"));
    }
}
