use std::collections::BTreeMap;
use std::str::FromStr;

use crate::model::task::{Task, TaskStatus, UnknownStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(TaskStatus),
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == *status,
        }
    }
}

impl From<TaskStatus> for StatusFilter {
    fn from(status: TaskStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl From<Option<TaskStatus>> for StatusFilter {
    fn from(status: Option<TaskStatus>) -> Self {
        status.map_or(StatusFilter::All, StatusFilter::Only)
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Due-date ordering for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Ascending
    }
}

pub type StatusCounts = BTreeMap<TaskStatus, usize>;

/// Stable sort by due date. Equal dates keep their relative order in both
/// directions.
pub fn sort_tasks(tasks: &mut [Task], order: SortOrder) {
    match order {
        SortOrder::Ascending => tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date)),
        SortOrder::Descending => tasks.sort_by(|a, b| b.due_date.cmp(&a.due_date)),
    }
}

/// Copies the tasks that pass `filter`, sorted by due date.
pub fn select_tasks(tasks: &[Task], filter: StatusFilter, order: SortOrder) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
    sort_tasks(&mut selected, order);
    selected
}

/// Statuses that occur at least once, with their counts.
pub fn count_by_status(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::new();
    for task in tasks {
        *counts.entry(task.status).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn task(title: &str, due: &str, status: TaskStatus) -> Task {
        Task::new(
            Uuid::new_v4(),
            title.to_string(),
            NaiveDate::parse_from_str(due, "%Y-%m-%d").unwrap(),
            status,
        )
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn fixture() -> Vec<Task> {
        vec![
            task("a", "2025-03-01", TaskStatus::Pending),
            task("b", "2025-01-01", TaskStatus::Done),
            task("c", "2025-03-01", TaskStatus::InProgress),
            task("d", "2025-02-01", TaskStatus::Pending),
            task("e", "2025-03-01", TaskStatus::Pending),
        ]
    }

    #[test]
    fn test_ascending_is_stable_on_ties() {
        let out = select_tasks(&fixture(), StatusFilter::All, SortOrder::Ascending);
        assert_eq!(titles(&out), vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_descending_is_stable_on_ties() {
        let out = select_tasks(&fixture(), StatusFilter::All, SortOrder::Descending);
        assert_eq!(titles(&out), vec!["a", "c", "e", "d", "b"]);
    }

    #[test]
    fn test_filter_by_status() {
        let tasks = fixture();
        let pending = select_tasks(&tasks, TaskStatus::Pending.into(), SortOrder::Ascending);
        assert_eq!(titles(&pending), vec!["d", "a", "e"]);
        assert!(pending.iter().all(|t| t.status == TaskStatus::Pending));

        let done = select_tasks(&tasks, StatusFilter::Only(TaskStatus::Done), SortOrder::Ascending);
        assert_eq!(titles(&done), vec!["b"]);
    }

    #[test]
    fn test_select_does_not_touch_input() {
        let tasks = fixture();
        let before = tasks.clone();
        let _ = select_tasks(&tasks, StatusFilter::All, SortOrder::Descending);
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_count_by_status() {
        let counts = count_by_status(&fixture());
        assert_eq!(counts.get(&TaskStatus::Pending), Some(&3));
        assert_eq!(counts.get(&TaskStatus::InProgress), Some(&1));
        assert_eq!(counts.get(&TaskStatus::Done), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 5);

        assert!(count_by_status(&[]).is_empty());
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(" ALL ".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "in-progress".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(TaskStatus::InProgress)
        );
        assert!("blocked".parse::<StatusFilter>().is_err());
    }
}
