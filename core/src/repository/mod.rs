pub mod file;
pub mod memory;
pub mod snapshot;
pub mod traits;

// Re-export
pub use file::{data_dir, FileSnapshotStorage};
pub use memory::MemorySnapshotStorage;
pub use traits::SnapshotStorage;
