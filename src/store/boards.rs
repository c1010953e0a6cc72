//! Board store: boards, their columns and the WIP limit check.
//!
//! Mirrors the task store's confirm-then-apply discipline: board and column
//! CRUD never mutates local state before the server acknowledges. Columns of
//! the current board are exposed as an always-sorted view; the task count
//! behind the WIP check is resolved through the `TaskStore` the caller
//! passes in, since the two stores are related by id lookup only.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{BoardError, Result};
use crate::store::tasks::TaskStore;
use crate::types::{
    default_column_requests, Board, BoardDraft, Column, CreateBoardRequest, CreateColumnRequest,
    UpdateBoardRequest, UpdateColumnRequest, DEFAULT_COLUMN_COLOR,
};

/// Owns the board list and the currently open board
pub struct BoardStore {
    api: Arc<ApiClient>,
    boards: Vec<Board>,
    current: Option<Board>,
    loading: bool,
    error: Option<String>,
}

impl BoardStore {
    /// Create an empty store backed by the given gateway
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            boards: Vec::new(),
            current: None,
            loading: false,
            error: None,
        }
    }

    // -- Read-only views --

    /// Boards loaded for the current project
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The currently open board
    pub fn current_board(&self) -> Option<&Board> {
        self.current.as_ref()
    }

    /// True while a request is outstanding
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The last failure message, cleared by the next operation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current board's columns, ascending by position
    pub fn current_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self
            .current
            .iter()
            .flat_map(|b| b.columns.iter())
            .collect();
        columns.sort_by_key(|c| c.position);
        columns
    }

    /// Look up a column on the current board
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.current.as_ref().and_then(|b| b.find_column(column_id))
    }

    /// Check whether a column can take `additional` more tasks.
    ///
    /// Columns without a WIP limit (and unknown columns) always pass.
    pub fn check_wip_limit(&self, tasks: &TaskStore, column_id: &str, additional: usize) -> bool {
        let Some(limit) = self.column(column_id).and_then(|c| c.wip_limit) else {
            return true;
        };
        tasks.column_task_count(column_id) + additional <= limit
    }

    // -- Board operations --

    /// Replace the board list with the project's boards
    pub async fn load_boards_by_project(&mut self, project_id: &str) -> Result<&[Board]> {
        self.begin();
        match self.api.list_boards(Some(project_id)).await {
            Ok(boards) => {
                debug!(count = boards.len(), project_id, "loaded boards");
                self.boards = boards;
                self.loading = false;
                Ok(&self.boards)
            }
            Err(err) => self.fail("failed to load boards", err),
        }
    }

    /// Fetch a board and make it current.
    ///
    /// The caller is expected to follow up with a task load for the board's
    /// project so column views have data behind them.
    pub async fn load_board(&mut self, id: &str) -> Result<&Board> {
        self.begin();
        match self.api.get_board(id).await {
            Ok(board) => {
                debug!(id, name = %board.name, "loaded board");
                self.loading = false;
                Ok(&*self.current.insert(board))
            }
            Err(err) => self.fail("failed to load board", err),
        }
    }

    /// Create a board, then its default column set as a follow-up batch.
    ///
    /// Column creation is compensating rather than transactional: if one
    /// create fails, the columns created so far are deleted best-effort and
    /// the error surfaces. The board itself is kept; an empty board is
    /// recoverable from the UI.
    pub async fn create_board(
        &mut self,
        request: CreateBoardRequest,
        created_by: &str,
    ) -> Result<Board> {
        if request.name.trim().is_empty() {
            return Err(BoardError::validation("name", "must not be empty"));
        }
        self.begin();
        let draft = BoardDraft::from_request(request, created_by);
        let mut board = match self.api.create_board(&draft).await {
            Ok(board) => board,
            Err(err) => return self.fail("failed to create board", err),
        };

        let mut created: Vec<Column> = Vec::new();
        for column_request in default_column_requests(&board.id) {
            match self.api.create_column(&column_request).await {
                Ok(column) => created.push(column),
                Err(err) => {
                    for column in &created {
                        if let Err(cleanup_err) = self.api.delete_column(&column.id).await {
                            warn!(column_id = %column.id, error = %cleanup_err,
                                "failed to clean up default column");
                        }
                    }
                    self.boards.push(board);
                    return self.fail("failed to create default columns", err);
                }
            }
        }

        debug!(id = %board.id, columns = created.len(), "created board");
        board.columns = created;
        self.boards.push(board.clone());
        self.loading = false;
        Ok(board)
    }

    /// Apply a partial update to a board
    pub async fn update_board(&mut self, id: &str, request: UpdateBoardRequest) -> Result<Board> {
        self.begin();
        match self.api.update_board(id, &request).await {
            Ok(updated) => {
                if self.current.as_ref().is_some_and(|b| b.id == id) {
                    self.current = Some(updated.clone());
                }
                if let Some(existing) = self.boards.iter_mut().find(|b| b.id == id) {
                    *existing = updated.clone();
                }
                self.loading = false;
                Ok(updated)
            }
            Err(err) => self.fail("failed to update board", err),
        }
    }

    /// Delete a board, removing it locally only after the server confirms
    pub async fn delete_board(&mut self, id: &str) -> Result<()> {
        self.begin();
        match self.api.delete_board(id).await {
            Ok(()) => {
                debug!(id, "deleted board");
                if self.current.as_ref().is_some_and(|b| b.id == id) {
                    self.current = None;
                }
                self.boards.retain(|b| b.id != id);
                self.loading = false;
                Ok(())
            }
            Err(err) => self.fail("failed to delete board", err),
        }
    }

    // -- Column operations --

    /// Create a column, attaching it to the current board when it belongs
    /// there
    pub async fn create_column(&mut self, mut request: CreateColumnRequest) -> Result<Column> {
        if request.title.trim().is_empty() {
            return Err(BoardError::validation("title", "must not be empty"));
        }
        if request.color.is_none() {
            request.color = Some(DEFAULT_COLUMN_COLOR.into());
        }
        self.begin();
        match self.api.create_column(&request).await {
            Ok(column) => {
                debug!(id = %column.id, board = %column.kanban_id, "created column");
                if let Some(board) = self
                    .current
                    .as_mut()
                    .filter(|b| b.id == column.kanban_id)
                {
                    board.columns.push(column.clone());
                }
                self.loading = false;
                Ok(column)
            }
            Err(err) => self.fail("failed to create column", err),
        }
    }

    /// Apply a partial update to a column
    pub async fn update_column(
        &mut self,
        id: &str,
        request: UpdateColumnRequest,
    ) -> Result<Column> {
        self.begin();
        match self.api.update_column(id, &request).await {
            Ok(updated) => {
                if let Some(board) = self.current.as_mut() {
                    if let Some(existing) = board.columns.iter_mut().find(|c| c.id == id) {
                        *existing = updated.clone();
                    }
                }
                self.loading = false;
                Ok(updated)
            }
            Err(err) => self.fail("failed to update column", err),
        }
    }

    /// Delete a column and cascade locally: the column leaves the current
    /// board and the task store drops its tasks, so no dangling `column_id`
    /// remains once the server confirms.
    pub async fn delete_column(&mut self, tasks: &mut TaskStore, id: &str) -> Result<()> {
        self.begin();
        match self.api.delete_column(id).await {
            Ok(()) => {
                debug!(id, "deleted column");
                if let Some(board) = self.current.as_mut() {
                    board.columns.retain(|c| c.id != id);
                }
                tasks.purge_column(id);
                self.loading = false;
                Ok(())
            }
            Err(err) => self.fail("failed to delete column", err),
        }
    }

    // -- Local state management --

    /// Make a board current without a fetch, e.g. one picked from `boards()`
    pub fn set_current_board(&mut self, board: Board) {
        self.current = Some(board);
    }

    /// Clear the error flag
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop all local state
    pub fn reset(&mut self) {
        self.boards.clear();
        self.current = None;
        self.loading = false;
        self.error = None;
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail<T>(&mut self, what: &str, err: BoardError) -> Result<T> {
        warn!(error = %err, "{what}");
        self.error = Some(what.to_string());
        self.loading = false;
        Err(err)
    }
}
