//! Core data types: tasks, boards/columns, filter and sort criteria

pub mod board;
pub mod filter;
pub mod task;

pub use board::{
    default_column_requests, Board, BoardDraft, BoardSettings, CardDisplayMode, Column,
    CreateBoardRequest, CreateColumnRequest, DragDropEvent, UpdateBoardRequest,
    UpdateColumnRequest, DEFAULT_COLUMN_COLOR,
};
pub use filter::{SortDirection, SortField, TaskFilter, TaskSort};
pub use task::{
    Assignee, Comment, CreateTaskRequest, Label, PositionUpdate, Task, TaskDraft, TaskPriority,
    TaskStatus, TaskType, UpdateTaskRequest,
};
