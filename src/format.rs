//! Pure mapping from stored and remote records to display-ready records.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::remote::types::RemoteTask;
use crate::storage::types::TaskRecord;

pub const EMPTY_TITLE: &str = "No title";
pub const EMPTY_DESCRIPTION: &str = "No description";
pub const EMPTY_DATE: &str = "No date";

const DATE_FORMAT: &str = "%d/%m/%Y";

/// A task ready for display. Every text field is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// A list of tasks plus its count label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub tasks: Vec<TaskView>,
    pub count_label: String,
}

impl TaskList {
    pub fn new(tasks: Vec<TaskView>) -> Self {
        let count_label = count_label(tasks.len());
        Self { tasks, count_label }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Today's date as `dd/mm/yyyy`.
pub fn current_date() -> String {
    format_date(Local::now().date_naive())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn record_to_view(record: &TaskRecord) -> TaskView {
    TaskView {
        id: record.id,
        date: record.date_created.clone().unwrap_or_else(current_date),
        title: record
            .title
            .clone()
            .unwrap_or_else(|| EMPTY_TITLE.to_string()),
        description: record
            .description
            .clone()
            .unwrap_or_else(|| EMPTY_DESCRIPTION.to_string()),
        completed: record.completed,
    }
}

pub fn records_to_views(records: &[TaskRecord]) -> Vec<TaskView> {
    records.iter().map(record_to_view).collect()
}

pub fn remote_to_view(remote: &RemoteTask) -> TaskView {
    TaskView {
        id: remote.id,
        date: current_date(),
        title: remote
            .todo
            .clone()
            .unwrap_or_else(|| EMPTY_TITLE.to_string()),
        description: EMPTY_DESCRIPTION.to_string(),
        completed: remote.completed.unwrap_or(false),
    }
}

/// The record stored for a seeded remote task: id kept, dated today, no description.
pub fn remote_to_record(remote: &RemoteTask) -> TaskRecord {
    TaskRecord {
        id: remote.id,
        title: Some(
            remote
                .todo
                .clone()
                .unwrap_or_else(|| EMPTY_TITLE.to_string()),
        ),
        description: Some(String::new()),
        completed: remote.completed.unwrap_or(false),
        date_created: Some(current_date()),
    }
}

pub fn count_label(count: usize) -> String {
    format!("{} tasks", count)
}

/// Plain-text summary of a task for sharing.
pub fn share_text(record: &TaskRecord) -> String {
    format!(
        "Title: {}\nDescription: {}\nDate: {}",
        record.title.as_deref().unwrap_or(EMPTY_TITLE),
        record.description.as_deref().unwrap_or(EMPTY_DESCRIPTION),
        record.date_created.as_deref().unwrap_or(EMPTY_DATE),
    )
}
