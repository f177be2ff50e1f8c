use std::fmt;

use thiserror::Error;

use crate::model::{ProjectId, TaskId};

/// Input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    DueDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => f.write_str("title"),
            Field::DueDate => f.write_str("due date"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Empty or whitespace-only.
    Empty,
    /// Not a `YYYY-MM-DD` calendar date.
    Unparsable,
    /// Earlier than today while past due dates are disallowed.
    PastDueDate,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Empty => f.write_str("is required"),
            ValidationReason::Unparsable => f.write_str("is not a YYYY-MM-DD date"),
            ValidationReason::PastDueDate => f.write_str("must be today or later"),
        }
    }
}

/// Failures reported by [`crate::ProjectStore`]. None of them leave the
/// store partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{field} {reason}")]
    Validation {
        field: Field,
        reason: ValidationReason,
    },
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    #[error("task {task_id} not found in project {project_id}")]
    TaskNotFound {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

impl StoreError {
    pub fn validation(field: Field, reason: ValidationReason) -> Self {
        StoreError::Validation { field, reason }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::ProjectNotFound(_) | StoreError::TaskNotFound { .. }
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Reasons a persisted snapshot is rejected on load.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate project id {0}")]
    DuplicateProject(ProjectId),
    #[error("duplicate task id {task_id} in project {project_id}")]
    DuplicateTask {
        project_id: ProjectId,
        task_id: TaskId,
    },
    #[error("project {0} has an empty title")]
    EmptyProjectTitle(ProjectId),
    #[error("task {task_id} in project {project_id} has an empty title")]
    EmptyTaskTitle {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_classification() {
        let v = StoreError::validation(Field::Title, ValidationReason::Empty);
        assert!(v.is_validation());
        assert!(!v.is_not_found());

        let n = StoreError::ProjectNotFound(Uuid::nil());
        assert!(n.is_not_found());
        assert!(!n.is_validation());
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = StoreError::validation(Field::DueDate, ValidationReason::Unparsable);
        assert_eq!(err.to_string(), "due date is not a YYYY-MM-DD date");
    }
}
