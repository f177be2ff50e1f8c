//! The project/task store: owns the canonical collection, validates every
//! mutation, answers the derived views and saves a whole snapshot after each
//! successful change.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{Field, SnapshotError, StoreError, StoreResult, ValidationReason};
use crate::model::{Project, ProjectId, Task, TaskId, TaskPatch, TaskStatus};
use crate::repository::snapshot;
use crate::repository::SnapshotStorage;
use crate::service::dto::ProjectSummary;
use crate::service::query::{self, SortOrder, StatusCounts, StatusFilter};
use crate::time::parse_iso_date;

/// Why the store started empty even though storage may hold data.
#[derive(Debug, Error)]
pub enum LoadWarning {
    #[error("stored snapshot is malformed and was ignored: {0}")]
    Malformed(#[source] SnapshotError),
    #[error("stored snapshot could not be read: {0:#}")]
    Unreadable(anyhow::Error),
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct ProjectStore<S: SnapshotStorage> {
    storage: S,
    config: StoreConfig,
    projects: Vec<Project>,
    today: fn() -> NaiveDate,
    load_warning: Option<LoadWarning>,
    dirty: bool,
}

impl<S: SnapshotStorage> ProjectStore<S> {
    /// Loads the last snapshot from `storage`. Never fails: missing, unreadable
    /// or malformed data starts an empty store (see [`Self::load_warning`]).
    pub fn open(storage: S, config: StoreConfig) -> Self {
        let (projects, load_warning) = match storage.load() {
            Ok(None) => {
                info!("no stored snapshot, starting empty");
                (Vec::new(), None)
            }
            Ok(Some(bytes)) => match snapshot::decode(&bytes) {
                Ok(projects) => {
                    info!(projects = projects.len(), "snapshot loaded");
                    (projects, None)
                }
                Err(e) => {
                    warn!(error = %e, "ignoring malformed snapshot");
                    (Vec::new(), Some(LoadWarning::Malformed(e)))
                }
            },
            Err(e) => {
                warn!(error = %format!("{e:#}"), "failed to load snapshot");
                (Vec::new(), Some(LoadWarning::Unreadable(e)))
            }
        };

        Self {
            storage,
            config,
            projects,
            today: local_today,
            load_warning,
            dirty: false,
        }
    }

    /// Replaces the clock used by the past-due-date check.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.load_warning.as_ref()
    }

    /// True while the last save attempt failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // Projects

    pub fn create_project(&mut self, title: &str, description: &str) -> StoreResult<Project> {
        let title = validate_title(title)?;

        let project = Project::new(self.fresh_project_id(), title, description.to_string());
        self.projects.push(project.clone());
        debug!(project_id = %project.id, "project created");

        self.persist();
        Ok(project)
    }

    pub fn update_project(
        &mut self,
        id: &ProjectId,
        title: &str,
        description: &str,
    ) -> StoreResult<Project> {
        let idx = self.project_index(id)?;
        let title = validate_title(title)?;

        let project = &mut self.projects[idx];
        project.title = title;
        project.description = description.to_string();
        let updated = project.clone();
        debug!(project_id = %id, "project updated");

        self.persist();
        Ok(updated)
    }

    /// Removes the project together with all of its tasks.
    pub fn delete_project(&mut self, id: &ProjectId) -> StoreResult<Project> {
        let idx = self.project_index(id)?;
        let removed = self.projects.remove(idx);
        debug!(project_id = %id, tasks = removed.tasks.len(), "project deleted");

        self.persist();
        Ok(removed)
    }

    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project(&self, id: &ProjectId) -> StoreResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == *id)
            .ok_or(StoreError::ProjectNotFound(*id))
    }

    pub fn project_summaries(&self) -> Vec<ProjectSummary> {
        self.projects.iter().map(ProjectSummary::from_entity).collect()
    }

    // Tasks

    /// Appends a task to the project. `status` defaults to Pending.
    pub fn add_task(
        &mut self,
        project_id: &ProjectId,
        title: &str,
        due_date: &str,
        status: Option<TaskStatus>,
    ) -> StoreResult<Task> {
        let idx = self.project_index(project_id)?;
        let title = validate_title(title)?;
        let due_date = self.validate_due_date(due_date)?;

        let id = fresh_id(|id| self.projects[idx].task(id).is_some());
        let task = Task::new(id, title, due_date, status.unwrap_or_default());
        self.projects[idx].tasks.push(task.clone());
        debug!(project_id = %project_id, task_id = %task.id, "task added");

        self.persist();
        Ok(task)
    }

    /// Replaces the fields present in `patch`; the rest stay as they were.
    pub fn update_task(
        &mut self,
        project_id: &ProjectId,
        task_id: &TaskId,
        patch: TaskPatch,
    ) -> StoreResult<Task> {
        let idx = self.project_index(project_id)?;
        if self.projects[idx].task(task_id).is_none() {
            return Err(task_not_found(project_id, task_id));
        }

        let title = patch.title.as_deref().map(validate_title).transpose()?;
        let due_date = patch
            .due_date
            .as_deref()
            .map(|raw| self.validate_due_date(raw))
            .transpose()?;

        let task = self.projects[idx]
            .task_mut(task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(due_date) = due_date {
            task.due_date = due_date;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        let updated = task.clone();
        debug!(project_id = %project_id, task_id = %task_id, "task updated");

        self.persist();
        Ok(updated)
    }

    pub fn delete_task(&mut self, project_id: &ProjectId, task_id: &TaskId) -> StoreResult<Task> {
        let idx = self.project_index(project_id)?;
        let tasks = &mut self.projects[idx].tasks;
        let pos = tasks
            .iter()
            .position(|t| t.id == *task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))?;
        let removed = tasks.remove(pos);
        debug!(project_id = %project_id, task_id = %task_id, "task deleted");

        self.persist();
        Ok(removed)
    }

    pub fn get_task(&self, project_id: &ProjectId, task_id: &TaskId) -> StoreResult<&Task> {
        self.get_project(project_id)?
            .task(task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))
    }

    /// Tasks of the project passing `filter`, sorted by due date. Returns
    /// copies; the stored order is untouched.
    pub fn list_tasks(
        &self,
        project_id: &ProjectId,
        filter: StatusFilter,
        order: SortOrder,
    ) -> StoreResult<Vec<Task>> {
        let project = self.get_project(project_id)?;
        Ok(query::select_tasks(&project.tasks, filter, order))
    }

    pub fn count_by_status(&self, project_id: &ProjectId) -> StoreResult<StatusCounts> {
        let project = self.get_project(project_id)?;
        Ok(query::count_by_status(&project.tasks))
    }

    // Persistence

    /// Saves the current collection now, reporting any failure to the caller.
    pub fn flush(&mut self) -> Result<()> {
        let bytes = snapshot::encode(&self.projects)?;
        match self.storage.save(&bytes) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                Err(e)
            }
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            warn!(error = %format!("{e:#}"), "failed to save snapshot, keeping changes in memory");
        }
    }

    // Helpers

    fn project_index(&self, id: &ProjectId) -> StoreResult<usize> {
        self.projects
            .iter()
            .position(|p| p.id == *id)
            .ok_or(StoreError::ProjectNotFound(*id))
    }

    fn fresh_project_id(&self) -> ProjectId {
        fresh_id(|id| self.projects.iter().any(|p| p.id == *id))
    }

    fn validate_due_date(&self, raw: &str) -> StoreResult<NaiveDate> {
        if raw.trim().is_empty() {
            return Err(StoreError::validation(Field::DueDate, ValidationReason::Empty));
        }
        let date = parse_iso_date(raw)
            .map_err(|_| StoreError::validation(Field::DueDate, ValidationReason::Unparsable))?;
        if !self.config.allow_past_due_dates && date < (self.today)() {
            return Err(StoreError::validation(Field::DueDate, ValidationReason::PastDueDate));
        }
        Ok(date)
    }
}

fn validate_title(raw: &str) -> StoreResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(StoreError::validation(Field::Title, ValidationReason::Empty));
    }
    Ok(title.to_string())
}

fn task_not_found(project_id: &ProjectId, task_id: &TaskId) -> StoreError {
    StoreError::TaskNotFound {
        project_id: *project_id,
        task_id: *task_id,
    }
}

/// Random v4 id, regenerated until `taken` rejects it.
fn fresh_id(taken: impl Fn(&Uuid) -> bool) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !taken(&id) {
            return id;
        }
    }
}
