pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::StoreConfig;
pub use error::{Field, SnapshotError, StoreError, StoreResult, ValidationReason};
pub use input::{expand_key, parse_args, parse_task_args, ParsedInput};
pub use model::{Project, ProjectId, Task, TaskId, TaskPatch, TaskStatus};
pub use repository::{FileSnapshotStorage, MemorySnapshotStorage, SnapshotStorage};
pub use service::dto::ProjectSummary;
pub use service::project_store::{LoadWarning, ProjectStore};
pub use service::query::{SortOrder, StatusCounts, StatusFilter};
pub use time::{format_iso_date, parse_human_date, parse_iso_date};
