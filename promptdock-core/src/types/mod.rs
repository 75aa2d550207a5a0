//! 类型定义模块

mod collection;
mod document;
mod group;
mod item;

pub use collection::{ItemCollection, ItemKind, GROUPS_COLLECTION};
pub use document::StorageDocument;
pub use group::{Group, NewGroup};
pub use item::{AgentFields, Item, McpFields, NewItem, PromptFields, RESERVED_KEYS};
