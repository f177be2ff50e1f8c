use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskboard_core::{format_iso_date, ProjectSummary, StatusCounts, Task, TaskStatus};

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Tasks")]
    tasks: String,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Title")]
    title: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// First eight hex digits; any unique prefix is accepted back as an id.
pub fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn projects_table(summaries: &[ProjectSummary]) -> String {
    let rows = summaries.iter().map(|s| ProjectRow {
        id: short_id(&s.id),
        title: s.title.clone(),
        description: s.description.clone(),
        tasks: format!(
            "{} ({} pending, {} in progress, {} done)",
            s.total_tasks, s.pending, s.in_progress, s.done
        ),
    });
    styled(Table::new(rows))
}

pub fn tasks_table(tasks: &[Task]) -> String {
    let rows = tasks.iter().map(|t| TaskRow {
        id: short_id(&t.id),
        due: format_iso_date(t.due_date),
        status: t.status.to_string(),
        title: t.title.clone(),
    });
    styled(Table::new(rows))
}

/// Every status gets a row, zero counts included, so the table shape is fixed.
pub fn counts_table(counts: &StatusCounts) -> String {
    let mut rows: Vec<CountRow> = TaskStatus::ALL
        .iter()
        .map(|status| CountRow {
            status: status.to_string(),
            count: counts.get(status).copied().unwrap_or(0),
        })
        .collect();
    rows.push(CountRow {
        status: "Total".to_string(),
        count: counts.values().sum(),
    });
    styled(Table::new(rows))
}
