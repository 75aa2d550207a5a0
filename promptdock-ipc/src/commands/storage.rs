use std::path::Path;

use promptdock_app::AppState;
use promptdock_core::types::StorageDocument;

use crate::error::AppError;

/// 备份数据
pub async fn backup_data(state: &AppState) -> Result<bool, AppError> {
    state.backup_service.backup().await?;
    Ok(true)
}

/// 恢复数据（未指定路径时使用最新备份）
pub async fn restore_data(
    state: &AppState,
    backup_path: Option<&str>,
) -> Result<StorageDocument, AppError> {
    Ok(state
        .backup_service
        .restore(backup_path.map(Path::new))
        .await?)
}

/// 获取存储文件路径
pub fn get_storage_path(state: &AppState) -> String {
    state.backup_service.storage_path().display().to_string()
}
