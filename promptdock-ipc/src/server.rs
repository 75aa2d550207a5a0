//! Request dispatch over newline-delimited JSON.
//!
//! Each input line is one request, each output line one response. Requests are
//! handled strictly in arrival order.

use std::str::FromStr;

use promptdock_app::AppState;
use promptdock_core::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::commands::{group, item, storage};
use crate::error::AppError;

/// Named operations exposed to the UI process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAllItems,
    GetItemById,
    CreateItem,
    UpdateItem,
    DeleteItem,
    GetItemsByGroup,
    GetAllGroups,
    GetGroupById,
    CreateGroup,
    UpdateGroup,
    DeleteGroup,
    BackupData,
    RestoreData,
    GetStoragePath,
}

impl Operation {
    pub const ALL: [Self; 14] = [
        Self::GetAllItems,
        Self::GetItemById,
        Self::CreateItem,
        Self::UpdateItem,
        Self::DeleteItem,
        Self::GetItemsByGroup,
        Self::GetAllGroups,
        Self::GetGroupById,
        Self::CreateGroup,
        Self::UpdateGroup,
        Self::DeleteGroup,
        Self::BackupData,
        Self::RestoreData,
        Self::GetStoragePath,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetAllItems => "get-all-items",
            Self::GetItemById => "get-item-by-id",
            Self::CreateItem => "create-item",
            Self::UpdateItem => "update-item",
            Self::DeleteItem => "delete-item",
            Self::GetItemsByGroup => "get-items-by-group",
            Self::GetAllGroups => "get-all-groups",
            Self::GetGroupById => "get-group-by-id",
            Self::CreateGroup => "create-group",
            Self::UpdateGroup => "update-group",
            Self::DeleteGroup => "delete-group",
            Self::BackupData => "backup-data",
            Self::RestoreData => "restore-data",
            Self::GetStoragePath => "get-storage-path",
        }
    }
}

impl FromStr for Operation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| AppError::unknown_operation(s))
    }
}

// ===== Wire types =====

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Value,
    pub op: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Response {
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AppError>,
}

impl Response {
    fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, error: AppError) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Positional arguments of one request
struct Args {
    op: Operation,
    values: Vec<Value>,
}

impl Args {
    fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).filter(|value| !value.is_null())
    }

    fn string(&self, index: usize, name: &str) -> Result<&str, AppError> {
        match self.get(index) {
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(self.invalid(&format!("`{name}` must be a string"))),
            None => Err(self.invalid(&format!("missing `{name}`"))),
        }
    }

    fn optional_string(&self, index: usize, name: &str) -> Result<Option<&str>, AppError> {
        match self.get(index) {
            None => Ok(None),
            Some(_) => self.string(index, name).map(Some),
        }
    }

    fn object(&self, index: usize, name: &str) -> Result<&Map<String, Value>, AppError> {
        match self.get(index) {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(self.invalid(&format!("`{name}` must be an object"))),
            None => Err(self.invalid(&format!("missing `{name}`"))),
        }
    }

    fn invalid(&self, reason: &str) -> AppError {
        AppError::invalid_arguments(self.op.as_str(), reason)
    }
}

fn to_result<T: Serialize>(value: T) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::from(CoreError::SerializationError(e.to_string())))
}

// ===== Dispatch =====

async fn dispatch(state: &AppState, request: Request) -> Result<Value, AppError> {
    let op: Operation = request.op.parse()?;
    let args = Args {
        op,
        values: request.args,
    };
    log::debug!("Dispatching {}", op.as_str());

    match op {
        Operation::GetAllItems => {
            to_result(item::get_all_items(state, args.string(0, "type")?).await?)
        }
        Operation::GetItemById => to_result(
            item::get_item_by_id(state, args.string(0, "type")?, args.string(1, "id")?).await?,
        ),
        Operation::CreateItem => {
            let data = Value::Object(args.object(1, "data")?.clone());
            to_result(item::create_item(state, args.string(0, "type")?, data).await?)
        }
        Operation::UpdateItem => to_result(
            item::update_item(
                state,
                args.string(0, "type")?,
                args.string(1, "id")?,
                args.object(2, "updates")?,
            )
            .await?,
        ),
        Operation::DeleteItem => to_result(
            item::delete_item(state, args.string(0, "type")?, args.string(1, "id")?).await?,
        ),
        Operation::GetItemsByGroup => to_result(
            item::get_items_by_group(state, args.string(0, "type")?, args.string(1, "groupId")?)
                .await?,
        ),
        Operation::GetAllGroups => to_result(group::get_all_groups(state).await?),
        Operation::GetGroupById => {
            to_result(group::get_group_by_id(state, args.string(0, "id")?).await?)
        }
        Operation::CreateGroup => {
            let data = Value::Object(args.object(0, "data")?.clone());
            to_result(group::create_group(state, data).await?)
        }
        Operation::UpdateGroup => to_result(
            group::update_group(state, args.string(0, "id")?, args.object(1, "updates")?).await?,
        ),
        Operation::DeleteGroup => {
            to_result(group::delete_group(state, args.string(0, "id")?).await?)
        }
        Operation::BackupData => to_result(storage::backup_data(state).await?),
        Operation::RestoreData => to_result(
            storage::restore_data(state, args.optional_string(0, "backupPath")?).await?,
        ),
        Operation::GetStoragePath => to_result(storage::get_storage_path(state)),
    }
}

/// Handles one input line and produces its response.
pub async fn handle_line(state: &AppState, line: &str) -> Response {
    let raw: Value = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => {
            return Response::failure(Value::Null, AppError::invalid_request(&e.to_string()));
        }
    };
    let id = raw.get("id").cloned().unwrap_or(Value::Null);

    let request: Request = match serde_json::from_value(raw) {
        Ok(request) => request,
        Err(e) => return Response::failure(id, AppError::invalid_request(&e.to_string())),
    };

    match dispatch(state, request).await {
        Ok(result) => Response::success(id, result),
        Err(error) => Response::failure(id, error),
    }
}

/// Serves requests until the reader reaches end of input.
pub async fn serve<R, W>(state: &AppState, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(state, &line).await;
        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }

    log::info!("Input closed, shutting down");
    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
