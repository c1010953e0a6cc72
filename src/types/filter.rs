//! Filtering and sorting of the task collection.
//!
//! Filters and sorts are pure projections: they never mutate the base
//! collection, and sorting is stable so equal keys keep their relative order.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskPriority, TaskStatus, TaskType};

/// Criteria a task must satisfy to pass the filter.
///
/// Empty lists and unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<TaskStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<TaskPriority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TaskType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignee_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Case-insensitive substring match on title and description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
}

impl TaskFilter {
    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
            && self.priority.is_empty()
            && self.types.is_empty()
            && self.assignee_ids.is_empty()
            && self.project_id.is_none()
            && self.search_text.as_deref().is_none_or(str::is_empty)
    }

    /// Check whether a task passes every set criterion
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.is_empty() && !self.status.contains(&task.status) {
            return false;
        }
        if !self.priority.is_empty() && !self.priority.contains(&task.priority) {
            return false;
        }
        if !self.types.is_empty() && !self.types.contains(&task.task_type) {
            return false;
        }
        if !self.assignee_ids.is_empty() {
            let assigned = task
                .assignee
                .as_ref()
                .is_some_and(|a| self.assignee_ids.contains(&a.id));
            if !assigned {
                return false;
            }
        }
        if let Some(project_id) = &self.project_id {
            if &task.project_id != project_id {
                return false;
            }
        }
        if let Some(text) = self.search_text.as_deref() {
            if !text.is_empty() {
                let needle = text.to_lowercase();
                let in_title = task.title.to_lowercase().contains(&needle);
                let in_description = task
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle));
                if !in_title && !in_description {
                    return false;
                }
            }
        }
        true
    }
}

/// Field the task list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Priority,
    DueDate,
    Title,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Current sort of the task list. Defaults to newest-created first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for TaskSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl TaskSort {
    /// Compare two tasks under this sort.
    ///
    /// A missing due date sorts earliest, so descending due-date sorts put
    /// undated tasks last.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Priority => a.priority.weight().cmp(&b.priority.weight()),
            SortField::DueDate => {
                let key = |t: &Task| t.due_date.unwrap_or(NaiveDate::MIN);
                key(a).cmp(&key(b))
            }
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}
