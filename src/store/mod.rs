pub mod filter;
pub mod task_store;

pub use filter::TaskFilter;
pub use task_store::{StoreEvent, TaskStore};
