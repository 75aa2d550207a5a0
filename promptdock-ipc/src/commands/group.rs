use promptdock_app::AppState;
use promptdock_core::types::{Group, NewGroup};
use serde_json::{Map, Value};

use crate::error::AppError;

/// 列出所有分组
pub async fn get_all_groups(state: &AppState) -> Result<Vec<Group>, AppError> {
    Ok(state.group_service.get_all().await?)
}

/// 按 ID 获取分组
pub async fn get_group_by_id(state: &AppState, id: &str) -> Result<Option<Group>, AppError> {
    Ok(state.group_service.get_by_id(id).await?)
}

/// 创建分组
pub async fn create_group(state: &AppState, data: Value) -> Result<Group, AppError> {
    let data = NewGroup::from_value(data)?;
    Ok(state.group_service.create(data).await?)
}

/// 更新分组
pub async fn update_group(
    state: &AppState,
    id: &str,
    updates: &Map<String, Value>,
) -> Result<Group, AppError> {
    Ok(state.group_service.update(id, updates).await?)
}

/// 删除分组
pub async fn delete_group(state: &AppState, id: &str) -> Result<bool, AppError> {
    Ok(state.group_service.delete(id).await?)
}
