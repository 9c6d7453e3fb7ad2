pub mod connection;
pub mod migrations;
pub mod kv_repo;
pub mod task_repo;

pub use connection::*;
pub use kv_repo::{KeyValueStore, MemoryKv, SqliteKv};
pub use task_repo::{TaskRepo, TASKS_STORAGE_KEY};
