//! To-do list
//!
//! - `Task` records keyed by creation timestamp
//! - `TaskManager` with add / toggle / delete, persisted after every mutation
//! - `TaskStore` backends (JSON file in the app directory, in-memory)

mod manager;
pub mod model;
pub mod storage;

pub use manager::TaskManager;
pub use model::Task;
pub use storage::{JsonTaskStore, MemoryTaskStore, TaskStore};
