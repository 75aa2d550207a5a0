pub mod group;
pub mod item;
pub mod storage;
