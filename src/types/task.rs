//! Task types: Task, enums, request DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state of a task. Wire values match the backend's column ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Map a column id to the status a task acquires when moved into it.
    ///
    /// Unknown columns map to `Todo`; custom columns added by the user
    /// have no workflow meaning of their own.
    pub fn for_column(column_id: &str) -> Self {
        match column_id {
            "in-progress" => Self::InProgress,
            "review" => Self::Review,
            "done" => Self::Done,
            _ => Self::Todo,
        }
    }

    /// Wire name of the status, used as a grouping key in stats
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }
}

/// Task priority, five levels from `Lowest` to `Highest`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

impl TaskPriority {
    /// Sort weight. Higher priority sorts as a larger value.
    pub fn weight(&self) -> u8 {
        match self {
            Self::Lowest => 1,
            Self::Low => 2,
            Self::Medium => 3,
            Self::High => 4,
            Self::Highest => 5,
        }
    }

    /// Wire name of the priority, used as a grouping key in stats
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lowest => "LOWEST",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Highest => "HIGHEST",
        }
    }
}

/// Kind of work a task represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Story,
    Bug,
    Task,
    Epic,
}

impl TaskType {
    /// Wire name of the type, used as a grouping key in stats
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Bug => "bug",
            Self::Task => "task",
            Self::Epic => "epic",
        }
    }
}

/// A user referenced by a task (assignee or reporter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A label attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A comment on a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub author: Assignee,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A task/card on the board.
///
/// `position` is the task's zero-based rank within its column; after any
/// successful operation the positions in a column are dense (0..n-1).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    pub reporter: Assignee,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub project_id: String,
    pub column_id: String,
    pub position: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with the given identity and placement.
    ///
    /// Used by tests and by callers constructing fixtures; real tasks come
    /// back from the server with server-assigned ids and timestamps.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        project_id: impl Into<String>,
        column_id: impl Into<String>,
        position: usize,
    ) -> Self {
        let column_id = column_id.into();
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::for_column(&column_id),
            priority: TaskPriority::Medium,
            task_type: TaskType::Task,
            assignee: None,
            reporter: Assignee {
                id: "system".into(),
                name: String::new(),
                email: String::new(),
                avatar: None,
            },
            labels: Vec::new(),
            estimated_hours: None,
            actual_hours: None,
            due_date: None,
            comments: Vec::new(),
            project_id: project_id.into(),
            column_id,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the task type
    pub fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

/// Request to create a task. The server assigns id, timestamps and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    pub reporter_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub project_id: String,
    pub column_id: String,
}

impl CreateTaskRequest {
    /// Create a request with the required fields and defaults for the rest
    pub fn new(
        title: impl Into<String>,
        reporter_id: impl Into<String>,
        project_id: impl Into<String>,
        column_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::Medium,
            task_type: TaskType::Task,
            assignee_id: None,
            reporter_id: reporter_id.into(),
            label_ids: Vec::new(),
            estimated_hours: None,
            due_date: None,
            project_id: project_id.into(),
            column_id: column_id.into(),
        }
    }
}

/// Partial update of a task. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

/// Body POSTed to create a task: the draft the store composes from a
/// `CreateTaskRequest` plus the position it computed for the target column.
///
/// New tasks always start in `todo` with zero actual hours; the assignee and
/// label objects are resolved server-side from the ids in the request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    pub reporter_id: String,
    pub label_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    pub actual_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub project_id: String,
    pub column_id: String,
    pub position: usize,
}

impl TaskDraft {
    /// Compose the POST body from a create request and a computed position
    pub fn from_request(request: CreateTaskRequest, position: usize) -> Self {
        Self {
            title: request.title,
            description: request.description,
            status: TaskStatus::Todo,
            priority: request.priority,
            task_type: request.task_type,
            assignee_id: request.assignee_id,
            reporter_id: request.reporter_id,
            label_ids: request.label_ids,
            estimated_hours: request.estimated_hours,
            actual_hours: 0.0,
            due_date: request.due_date,
            project_id: request.project_id,
            column_id: request.column_id,
            position,
        }
    }
}

/// One entry in a batch reposition request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub id: String,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_column() {
        assert_eq!(TaskStatus::for_column("todo"), TaskStatus::Todo);
        assert_eq!(TaskStatus::for_column("in-progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::for_column("review"), TaskStatus::Review);
        assert_eq!(TaskStatus::for_column("done"), TaskStatus::Done);
        // Custom columns fall back to todo
        assert_eq!(TaskStatus::for_column("blocked"), TaskStatus::Todo);
    }

    #[test]
    fn test_priority_weights_are_ordered() {
        let ordered = [
            TaskPriority::Lowest,
            TaskPriority::Low,
            TaskPriority::Medium,
            TaskPriority::High,
            TaskPriority::Highest,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].weight() < pair[1].weight());
        }
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&TaskPriority::Highest).unwrap(),
            "\"HIGHEST\""
        );
        assert_eq!(serde_json::to_string(&TaskType::Bug).unwrap(), "\"bug\"");
    }

    #[test]
    fn test_task_serialization_round_trip() {
        let task = Task::new("t1", "Fix login", "p1", "in-progress", 2)
            .with_description("The form hangs")
            .with_priority(TaskPriority::High)
            .with_type(TaskType::Bug);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"columnId\":\"in-progress\""));
        assert!(json.contains("\"type\":\"bug\""));

        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, task.title);
        assert_eq!(parsed.status, TaskStatus::InProgress);
        assert_eq!(parsed.position, 2);
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let req = UpdateTaskRequest {
            position: Some(3),
            column_id: Some("done".into()),
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            "{\"status\":\"done\",\"columnId\":\"done\",\"position\":3}"
        );
    }
}
