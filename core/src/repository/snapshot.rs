//! JSON codec for the persisted collection.
//!
//! The document is an array of projects in insertion order, each carrying its
//! tasks in creation order:
//!
//! ```json
//! [{"id": "...", "title": "Launch", "description": "Q1 rollout",
//!   "tasks": [{"id": "...", "title": "Build", "dueDate": "2025-02-01", "status": "Pending"}]}]
//! ```

use std::collections::HashSet;

use crate::error::SnapshotError;
use crate::model::Project;

pub fn encode(projects: &[Project]) -> Result<Vec<u8>, SnapshotError> {
    Ok(serde_json::to_vec_pretty(projects)?)
}

/// Parses a snapshot and rejects any that breaks the collection invariants.
pub fn decode(bytes: &[u8]) -> Result<Vec<Project>, SnapshotError> {
    let projects: Vec<Project> = serde_json::from_slice(bytes)?;
    check_invariants(&projects)?;
    Ok(projects)
}

fn check_invariants(projects: &[Project]) -> Result<(), SnapshotError> {
    let mut project_ids = HashSet::new();
    for project in projects {
        if !project_ids.insert(project.id) {
            return Err(SnapshotError::DuplicateProject(project.id));
        }
        if project.title.trim().is_empty() {
            return Err(SnapshotError::EmptyProjectTitle(project.id));
        }

        let mut task_ids = HashSet::new();
        for task in &project.tasks {
            if !task_ids.insert(task.id) {
                return Err(SnapshotError::DuplicateTask {
                    project_id: project.id,
                    task_id: task.id,
                });
            }
            if task.title.trim().is_empty() {
                return Err(SnapshotError::EmptyTaskTitle {
                    project_id: project.id,
                    task_id: task.id,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, TaskStatus};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample() -> Vec<Project> {
        let mut launch = Project::new(Uuid::new_v4(), "Launch".into(), "Q1 rollout".into());
        for (i, status) in TaskStatus::ALL.iter().enumerate() {
            launch.tasks.push(Task::new(
                Uuid::new_v4(),
                format!("task {i}"),
                NaiveDate::from_ymd_opt(2025, 1, 1 + i as u32).unwrap(),
                *status,
            ));
        }
        let empty = Project::new(Uuid::new_v4(), "Later".into(), String::new());
        vec![launch, empty]
    }

    #[test]
    fn test_round_trip_preserves_collection() {
        let projects = sample();
        let bytes = encode(&projects).unwrap();
        assert_eq!(decode(&bytes).unwrap(), projects);
    }

    #[test]
    fn test_round_trip_empty_collection() {
        let bytes = encode(&[]).unwrap();
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_missing_tasks_key_means_no_tasks() {
        let json = r#"[{"id":"00000000-0000-0000-0000-000000000001","title":"A","description":""}]"#;
        let projects = decode(json.as_bytes()).unwrap();
        assert!(projects[0].tasks.is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode(b"{not json"), Err(SnapshotError::Json(_))));
        assert!(matches!(decode(b"{\"a\":1}"), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_rejects_bad_status_and_date() {
        let bad_status = r#"[{"id":"00000000-0000-0000-0000-000000000001","title":"A","description":"",
            "tasks":[{"id":"00000000-0000-0000-0000-000000000002","title":"t","dueDate":"2025-01-01","status":"Blocked"}]}]"#;
        assert!(decode(bad_status.as_bytes()).is_err());

        let bad_date = r#"[{"id":"00000000-0000-0000-0000-000000000001","title":"A","description":"",
            "tasks":[{"id":"00000000-0000-0000-0000-000000000002","title":"t","dueDate":"01/01/2025"}]}]"#;
        assert!(decode(bad_date.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut projects = sample();
        projects[1].id = projects[0].id;
        let bytes = encode(&projects).unwrap();
        assert!(matches!(decode(&bytes), Err(SnapshotError::DuplicateProject(_))));

        let mut projects = sample();
        let dup = projects[0].tasks[0].id;
        projects[0].tasks[1].id = dup;
        let bytes = encode(&projects).unwrap();
        assert!(matches!(decode(&bytes), Err(SnapshotError::DuplicateTask { .. })));
    }

    #[test]
    fn test_same_task_id_in_different_projects_is_fine() {
        let mut projects = sample();
        let shared = projects[0].tasks[0].clone();
        projects[1].tasks.push(shared);
        let bytes = encode(&projects).unwrap();
        assert_eq!(decode(&bytes).unwrap(), projects);
    }

    #[test]
    fn test_rejects_blank_titles() {
        let mut projects = sample();
        projects[0].title = "  ".into();
        let bytes = encode(&projects).unwrap();
        assert!(matches!(decode(&bytes), Err(SnapshotError::EmptyProjectTitle(_))));
    }
}
