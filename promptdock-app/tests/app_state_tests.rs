#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the services over the JSON store.

use std::sync::Arc;
use std::time::Duration;

use promptdock_app::adapters::JsonDocumentStore;
use promptdock_app::{AppState, AppStateBuilder, StoragePaths};
use promptdock_core::error::CoreError;
use promptdock_core::types::{NewGroup, NewItem};
use serde_json::json;

async fn create_test_state() -> (AppState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = JsonDocumentStore::new(StoragePaths::from_data_dir(tmp.path()));
    let state = AppStateBuilder::new()
        .document_store(Arc::new(store))
        .build()
        .expect("failed to build AppState");
    state.initialize().await.expect("failed to initialize storage");
    (state, tmp)
}

fn new_item(data: serde_json::Value) -> NewItem {
    NewItem::from_value(data).unwrap()
}

#[test]
fn build_without_store_fails() {
    let result = AppStateBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn created_prompt_survives_reopen() {
    let (state, tmp) = create_test_state().await;
    let created = state
        .item_service
        .create(
            "prompt",
            new_item(json!({ "name": "Summarize", "content": "Summarize {{text}}" })),
        )
        .await
        .unwrap();

    let raw = std::fs::read_to_string(tmp.path().join("data/storage.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["prompts"][0]["id"], json!(created.id));
    assert_eq!(value["prompts"][0]["content"], json!("Summarize {{text}}"));

    let store = JsonDocumentStore::new(StoragePaths::from_data_dir(tmp.path()));
    let reopened = AppStateBuilder::new()
        .document_store(Arc::new(store))
        .build()
        .unwrap();
    reopened.initialize().await.unwrap();
    let items = reopened.item_service.get_all("prompt").await.unwrap();
    assert_eq!(items, vec![created]);
}

#[tokio::test]
async fn update_and_delete_round_trip_through_disk() {
    let (state, _tmp) = create_test_state().await;
    let created = state
        .item_service
        .create("agent", new_item(json!({ "name": "Helper", "model": "m-1" })))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let updates = json!({ "model": "m-2" });
    let updated = state
        .item_service
        .update("agent", &created.id, updates.as_object().unwrap())
        .await
        .unwrap();
    assert_eq!(updated.fields["model"], json!("m-2"));
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    assert!(state.item_service.delete("agent", &created.id).await.unwrap());
    assert!(state.item_service.get_all("agent").await.unwrap().is_empty());
}

#[tokio::test]
async fn groups_and_membership() {
    let (state, _tmp) = create_test_state().await;
    let group = state
        .group_service
        .create(NewGroup::from_value(json!({ "name": "Servers", "itemType": "mcp" })).unwrap())
        .await
        .unwrap();

    state
        .item_service
        .create("mcp", new_item(json!({ "name": "fs", "groupId": group.id })))
        .await
        .unwrap();
    state
        .item_service
        .create("mcp", new_item(json!({ "name": "web" })))
        .await
        .unwrap();

    let members = state
        .item_service
        .get_by_group("mcp", &group.id)
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "fs");
}

#[tokio::test]
async fn backup_then_restore_returns_earlier_state() {
    let (state, _tmp) = create_test_state().await;
    state
        .item_service
        .create("prompt", new_item(json!({ "name": "before" })))
        .await
        .unwrap();
    state.backup_service.backup().await.unwrap();
    let snapshot = state.item_service.get_all("prompt").await.unwrap();

    state
        .item_service
        .create("prompt", new_item(json!({ "name": "after" })))
        .await
        .unwrap();

    let restored = state.backup_service.restore(None).await.unwrap();
    assert_eq!(restored.prompts, snapshot);
    assert_eq!(state.item_service.get_all("prompt").await.unwrap(), snapshot);
}

#[tokio::test]
async fn concurrent_creates_are_all_persisted() {
    let (state, _tmp) = create_test_state().await;
    let (a, b, c) = tokio::join!(
        state.item_service.create("prompt", new_item(json!({ "name": "a" }))),
        state.item_service.create("prompt", new_item(json!({ "name": "b" }))),
        state.item_service.create("prompt", new_item(json!({ "name": "c" }))),
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();

    assert_eq!(state.item_service.get_all("prompt").await.unwrap().len(), 3);
}

#[tokio::test]
async fn storage_path_points_at_live_document() {
    let (state, tmp) = create_test_state().await;
    assert_eq!(
        state.backup_service.storage_path(),
        tmp.path().join("data").join("storage.json")
    );
}
