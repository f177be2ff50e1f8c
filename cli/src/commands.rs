use anyhow::{anyhow, bail, Result};
use chrono::Local;
use taskboard_core::{
    format_iso_date, parse_human_date, parse_task_args, ProjectId, ProjectStore, SnapshotStorage,
    SortOrder, StatusFilter, TaskId, TaskPatch, TaskStatus,
};
use uuid::Uuid;

use crate::render;
use crate::{ProjectCommand, TaskCommand};

pub fn run_project<S: SnapshotStorage>(store: &mut ProjectStore<S>, cmd: ProjectCommand) -> Result<()> {
    match cmd {
        ProjectCommand::Add { title, description } => {
            let project = store.create_project(&title, &description)?;
            println!("Project added: {} (ID: {})", project.title, render::short_id(&project.id));
        }
        ProjectCommand::Edit {
            project,
            title,
            description,
        } => {
            let id = resolve_project(store, &project)?;
            let current = store.get_project(&id)?;
            let title = title.unwrap_or_else(|| current.title.clone());
            let description = description.unwrap_or_else(|| current.description.clone());
            let updated = store.update_project(&id, &title, &description)?;
            println!("Project updated: {}", updated.title);
        }
        ProjectCommand::Rm { project } => {
            let id = resolve_project(store, &project)?;
            let removed = store.delete_project(&id)?;
            println!(
                "Project removed: {} ({} tasks)",
                removed.title,
                removed.tasks.len()
            );
        }
        ProjectCommand::List => {
            let summaries = store.project_summaries();
            if summaries.is_empty() {
                println!("No projects found.");
            } else {
                println!("{}", render::projects_table(&summaries));
            }
        }
    }
    Ok(())
}

pub fn run_task<S: SnapshotStorage>(store: &mut ProjectStore<S>, cmd: TaskCommand) -> Result<()> {
    match cmd {
        TaskCommand::Add { project, args } => {
            let project_id = resolve_project(store, &project)?;
            let parsed = parse_task_args(&args)?;
            let due = parsed
                .fields
                .get("due")
                .ok_or_else(|| anyhow!("A due date is required (due:YYYY-MM-DD)"))?;
            let due = resolve_due(due)?;
            let status = parsed.fields.get("status").map(|s| s.parse::<TaskStatus>()).transpose()?;

            let task = store.add_task(&project_id, &parsed.title, &due, status)?;
            println!("Task added: {} (ID: {})", task.title, render::short_id(&task.id));
            println!("  Due: {}", format_iso_date(task.due_date));
            println!("  Status: {}", task.status);
        }
        TaskCommand::Edit { project, task, args } => {
            let project_id = resolve_project(store, &project)?;
            let task_id = resolve_task(store, &project_id, &task)?;
            let parsed = parse_task_args(&args)?;

            let patch = TaskPatch {
                title: Some(parsed.title).filter(|t| !t.is_empty()),
                due_date: parsed.fields.get("due").map(|d| resolve_due(d)).transpose()?,
                status: parsed.fields.get("status").map(|s| s.parse()).transpose()?,
            };
            if patch.is_empty() {
                bail!("Nothing to change: give a new title, due:<date> or status:<status>");
            }
            let updated = store.update_task(&project_id, &task_id, patch)?;
            println!("Task updated: {}", updated.title);
        }
        TaskCommand::Done { project, task } => {
            let project_id = resolve_project(store, &project)?;
            let task_id = resolve_task(store, &project_id, &task)?;
            let updated = store.update_task(&project_id, &task_id, TaskPatch::status(TaskStatus::Done))?;
            println!("Task done: {}", updated.title);
        }
        TaskCommand::Rm { project, task } => {
            let project_id = resolve_project(store, &project)?;
            let task_id = resolve_task(store, &project_id, &task)?;
            let removed = store.delete_task(&project_id, &task_id)?;
            println!("Task removed: {}", removed.title);
        }
        TaskCommand::List { project, status, desc } => {
            let project_id = resolve_project(store, &project)?;
            let filter: StatusFilter = status.parse()?;
            let order = if desc { SortOrder::Descending } else { SortOrder::Ascending };
            let tasks = store.list_tasks(&project_id, filter, order)?;
            if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                println!("{}", render::tasks_table(&tasks));
            }
        }
    }
    Ok(())
}

pub fn run_stats<S: SnapshotStorage>(store: &ProjectStore<S>, project: &str) -> Result<()> {
    let project_id = resolve_project(store, project)?;
    let counts = store.count_by_status(&project_id)?;
    let title = &store.get_project(&project_id)?.title;
    println!("{}", title);
    println!("{}", render::counts_table(&counts));
    Ok(())
}

/// Turns `fri`, `+3d`, `tomorrow`... into the ISO form the store expects.
/// Anything unrecognised is passed through so the store reports it.
fn resolve_due(input: &str) -> Result<String> {
    let today = Local::now().date_naive();
    match parse_human_date(input, today) {
        Ok(date) => Ok(format_iso_date(date)),
        Err(_) => Ok(input.to_string()),
    }
}

fn resolve_by_prefix(ids: impl Iterator<Item = Uuid>, prefix: &str, kind: &str) -> Result<Uuid> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        bail!("Empty {} id", kind);
    }
    let matches: Vec<Uuid> = ids.filter(|id| id.to_string().starts_with(&prefix)).collect();
    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(anyhow!("No {} matches '{}'", kind, prefix)),
        n => Err(anyhow!("Ambiguous {} id '{}' matches {} entries", kind, prefix, n)),
    }
}

fn resolve_project<S: SnapshotStorage>(store: &ProjectStore<S>, prefix: &str) -> Result<ProjectId> {
    resolve_by_prefix(store.list_projects().iter().map(|p| p.id), prefix, "project")
}

fn resolve_task<S: SnapshotStorage>(
    store: &ProjectStore<S>,
    project_id: &ProjectId,
    prefix: &str,
) -> Result<TaskId> {
    let project = store.get_project(project_id)?;
    resolve_by_prefix(project.tasks.iter().map(|t| t.id), prefix, "task")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_prefix() {
        let a = Uuid::parse_str("aaaa0000-0000-0000-0000-000000000001").unwrap();
        let b = Uuid::parse_str("aabb0000-0000-0000-0000-000000000002").unwrap();
        let ids = || vec![a, b].into_iter();

        assert_eq!(resolve_by_prefix(ids(), "aaaa", "project").unwrap(), a);
        assert_eq!(resolve_by_prefix(ids(), "AABB", "project").unwrap(), b);
        assert!(resolve_by_prefix(ids(), "aa", "project").is_err());
        assert!(resolve_by_prefix(ids(), "ff", "project").is_err());
        assert!(resolve_by_prefix(ids(), "", "project").is_err());
    }

    #[test]
    fn test_resolve_due_passes_iso_through() {
        assert_eq!(resolve_due("2025-03-01").unwrap(), "2025-03-01");
        assert_eq!(resolve_due("garbage").unwrap(), "garbage");
    }

    #[test]
    fn test_resolve_due_out_of_range_is_left_for_the_store() {
        assert_eq!(resolve_due("+4000000000d").unwrap(), "+4000000000d");
        assert_eq!(resolve_due("99999999999999:fri").unwrap(), "99999999999999:fri");
    }
}
