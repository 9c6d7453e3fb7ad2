pub mod task;
pub mod changes;

pub use task::*;
pub use changes::*;
