pub mod project;
pub mod task;

pub use project::{Project, ProjectId};
pub use task::{Task, TaskId, TaskPatch, TaskStatus, UnknownStatus};
