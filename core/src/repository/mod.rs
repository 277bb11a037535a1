pub mod file;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use snapshot::Snapshot;
pub use traits::{CategoryRepository, TaskRepository};
