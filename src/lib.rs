//! Client-side kanban board engine.
//!
//! Keeps a local mirror of tasks, columns and boards fetched from a REST
//! backend, reconciles drag-drop gestures against that mirror (optimistic
//! cross-column moves with rollback, batched same-column reorders), enforces
//! column WIP limits, and computes board statistics.
//!
//! The pieces compose explicitly: an [`ApiClient`] is shared by the stores,
//! and the [`Reconciler`] operates on a [`TaskStore`] and [`BoardStore`] pair.
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskboard::{ApiClient, BoardStore, Reconciler, TaskStore};
//!
//! # async fn run() -> taskboard::Result<()> {
//! let api = Arc::new(ApiClient::new("http://localhost:3000").with_token("jwt"));
//! let mut boards = BoardStore::new(Arc::clone(&api));
//! let mut tasks = TaskStore::new(Arc::clone(&api));
//!
//! let board = boards.load_board("kanban-1").await?;
//! let project_id = board.project_id.clone();
//! tasks.load_tasks(Some(&project_id)).await?;
//!
//! let _reconciler = Reconciler::new();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod reconcile;
pub mod stats;
pub mod store;
pub mod types;

pub use api::{ApiClient, Session, User};
pub use error::{BoardError, Result};
pub use reconcile::Reconciler;
pub use stats::{board_stats, board_stats_now, BoardStats};
pub use store::{BoardStore, MoveUndo, TaskStore};
pub use types::{
    Board, BoardSettings, Column, CreateBoardRequest, CreateColumnRequest, CreateTaskRequest,
    DragDropEvent, Task, TaskFilter, TaskPriority, TaskSort, TaskStatus, TaskType,
    UpdateBoardRequest, UpdateColumnRequest, UpdateTaskRequest,
};
