//! Board-level types: Board, Column, settings, drag-drop event, request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A column on the board: an ordered bucket of tasks, optionally capped
/// by a WIP limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    /// Order among the board's columns, unique within a board
    pub position: usize,
    /// Max task count; `None` = unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<usize>,
    pub is_droppable: bool,
    pub is_draggable: bool,
    pub kanban_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Create a column with the given identity and placement
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kanban_id: impl Into<String>,
        position: usize,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            color: DEFAULT_COLUMN_COLOR.into(),
            position,
            wip_limit: None,
            is_droppable: true,
            is_draggable: true,
            kanban_id: kanban_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the WIP limit
    pub fn with_wip_limit(mut self, limit: usize) -> Self {
        self.wip_limit = Some(limit);
        self
    }
}

/// Display toggles and behavior settings for a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    pub enable_wip_limit: bool,
    pub show_task_count: bool,
    pub show_priority: bool,
    pub show_assignee: bool,
    pub show_labels: bool,
    pub show_due_date: bool,
    pub card_display_mode: CardDisplayMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_refresh_interval: Option<u32>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            enable_wip_limit: true,
            show_task_count: true,
            show_priority: true,
            show_assignee: true,
            show_labels: true,
            show_due_date: true,
            card_display_mode: CardDisplayMode::Detailed,
            auto_refresh_interval: Some(30),
        }
    }
}

/// How task cards are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardDisplayMode {
    Compact,
    Detailed,
}

/// A board: a named collection of ordered columns scoped to one project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    pub project_id: String,
    pub created_by: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
    pub is_default: bool,
    pub settings: BoardSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create a board with the given identity and default settings
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            columns: Vec::new(),
            project_id: project_id.into(),
            created_by: String::new(),
            member_ids: Vec::new(),
            is_default: false,
            settings: BoardSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the columns
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Find a column by id
    pub fn find_column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }
}

/// Fallback column color used when a create request does not set one
pub const DEFAULT_COLUMN_COLOR: &str = "#f4f5f7";

/// The default column set created for a new board.
///
/// Positions 0..3; `in-progress` and `review` carry WIP limits, `done`
/// cannot be dragged from.
pub fn default_column_requests(kanban_id: &str) -> Vec<CreateColumnRequest> {
    vec![
        CreateColumnRequest {
            title: "To Do".into(),
            description: Some("Newly created tasks".into()),
            color: Some("#f4f5f7".into()),
            position: 0,
            wip_limit: None,
            is_droppable: true,
            is_draggable: true,
            kanban_id: kanban_id.into(),
        },
        CreateColumnRequest {
            title: "In Progress".into(),
            description: Some("Tasks under active development".into()),
            color: Some("#e3fcef".into()),
            position: 1,
            wip_limit: Some(3),
            is_droppable: true,
            is_draggable: true,
            kanban_id: kanban_id.into(),
        },
        CreateColumnRequest {
            title: "Review".into(),
            description: Some("Tasks waiting on code review".into()),
            color: Some("#fff4e6".into()),
            position: 2,
            wip_limit: Some(2),
            is_droppable: true,
            is_draggable: true,
            kanban_id: kanban_id.into(),
        },
        CreateColumnRequest {
            title: "Done".into(),
            description: Some("Completed tasks".into()),
            color: Some("#e6fcff".into()),
            position: 3,
            wip_limit: None,
            is_droppable: true,
            is_draggable: false,
            kanban_id: kanban_id.into(),
        },
    ]
}

/// Request to create a column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<usize>,
    pub is_droppable: bool,
    pub is_draggable: bool,
    pub kanban_id: String,
}

impl CreateColumnRequest {
    /// Create a request with the required fields and defaults for the rest
    pub fn new(title: impl Into<String>, kanban_id: impl Into<String>, position: usize) -> Self {
        Self {
            title: title.into(),
            description: None,
            color: None,
            position,
            wip_limit: None,
            is_droppable: true,
            is_draggable: true,
            kanban_id: kanban_id.into(),
        }
    }
}

/// Partial update of a column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumnRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_droppable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_draggable: Option<bool>,
}

/// Request to create a board. The server assigns the id; default columns
/// are created by the store as a follow-up batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<BoardSettings>,
}

impl CreateBoardRequest {
    /// Create a request with the required fields and defaults for the rest
    pub fn new(name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            project_id: project_id.into(),
            member_ids: Vec::new(),
            settings: None,
        }
    }
}

/// Body POSTed to create a board: the request merged with server-owned
/// defaults. Columns are not embedded; they are created as a follow-up batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: String,
    pub created_by: String,
    pub member_ids: Vec<String>,
    pub is_default: bool,
    pub settings: BoardSettings,
}

impl BoardDraft {
    /// Compose the POST body from a create request
    pub fn from_request(request: CreateBoardRequest, created_by: impl Into<String>) -> Self {
        Self {
            name: request.name,
            description: request.description,
            project_id: request.project_id,
            created_by: created_by.into(),
            member_ids: request.member_ids,
            is_default: false,
            settings: request.settings.unwrap_or_default(),
        }
    }
}

/// Partial update of a board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<BoardSettings>,
}

/// A completed drag gesture, as dispatched by the view.
///
/// Container ids are column ids; indices are the dragged card's rank in the
/// source and target columns' visual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragDropEvent {
    pub task_id: String,
    pub source_column_id: String,
    pub target_column_id: String,
    pub source_index: usize,
    pub target_index: usize,
}

impl DragDropEvent {
    /// True when the gesture stays inside one column
    pub fn is_reorder(&self) -> bool {
        self.source_column_id == self.target_column_id
    }
}
