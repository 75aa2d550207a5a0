use promptdock_app::AppState;
use promptdock_core::types::{Item, NewItem};
use serde_json::{Map, Value};

use crate::error::AppError;

/// 列出集合中的所有条目
pub async fn get_all_items(state: &AppState, item_type: &str) -> Result<Vec<Item>, AppError> {
    Ok(state.item_service.get_all(item_type).await?)
}

/// 按 ID 获取条目
pub async fn get_item_by_id(
    state: &AppState,
    item_type: &str,
    id: &str,
) -> Result<Option<Item>, AppError> {
    Ok(state.item_service.get_by_id(item_type, id).await?)
}

/// 创建条目
pub async fn create_item(state: &AppState, item_type: &str, data: Value) -> Result<Item, AppError> {
    let data = NewItem::from_value(data)?;
    Ok(state.item_service.create(item_type, data).await?)
}

/// 更新条目
pub async fn update_item(
    state: &AppState,
    item_type: &str,
    id: &str,
    updates: &Map<String, Value>,
) -> Result<Item, AppError> {
    Ok(state.item_service.update(item_type, id, updates).await?)
}

/// 删除条目
pub async fn delete_item(state: &AppState, item_type: &str, id: &str) -> Result<bool, AppError> {
    Ok(state.item_service.delete(item_type, id).await?)
}

/// 列出分组内的条目
pub async fn get_items_by_group(
    state: &AppState,
    item_type: &str,
    group_id: &str,
) -> Result<Vec<Item>, AppError> {
    Ok(state.item_service.get_by_group(item_type, group_id).await?)
}
