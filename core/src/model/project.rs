use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::task::{Task, TaskId};

pub type ProjectId = Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    // Creation order. Display sorting never reorders this list.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(id: ProjectId, title: String, description: String) -> Self {
        Self {
            id,
            title,
            description,
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == *id)
    }
}
