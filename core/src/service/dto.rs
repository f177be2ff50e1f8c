use serde::{Deserialize, Serialize};

use crate::model::project::{Project, ProjectId};
use crate::model::task::TaskStatus;
use crate::service::query::count_by_status;

/// Flattened project row for list views.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub total_tasks: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl ProjectSummary {
    pub fn from_entity(project: &Project) -> Self {
        let counts = count_by_status(&project.tasks);
        let count = |status: TaskStatus| counts.get(&status).copied().unwrap_or(0);

        Self {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            total_tasks: project.tasks.len(),
            pending: count(TaskStatus::Pending),
            in_progress: count(TaskStatus::InProgress),
            done: count(TaskStatus::Done),
        }
    }
}
