//! Task store: the authoritative in-memory task collection.
//!
//! The store owns the task list for the loaded project and applies the
//! confirm-then-apply discipline: remote mutations touch local state only
//! after the server acknowledges them. The one exception is the optimistic
//! drag-drop transfer, which records its exact inverse so the reconciler can
//! roll it back on failure.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{BoardError, Result};
use crate::types::{
    CreateTaskRequest, PositionUpdate, Task, TaskDraft, TaskFilter, TaskSort, TaskStatus,
    UpdateTaskRequest,
};

/// Inverse of an optimistic drag-drop transfer.
///
/// Holds where the task came from so a failed move can be reversed exactly:
/// back into the source column at the source index.
#[derive(Debug, Clone)]
pub struct MoveUndo {
    pub task_id: String,
    pub source_column_id: String,
    pub source_index: usize,
}

/// Owns the task collection plus filter/sort state and the load/error flags
/// surfaced to the view.
pub struct TaskStore {
    api: Arc<ApiClient>,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    filter: TaskFilter,
    sort: TaskSort,
}

impl TaskStore {
    /// Create an empty store backed by the given gateway
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            loading: false,
            error: None,
            filter: TaskFilter::default(),
            sort: TaskSort::default(),
        }
    }

    // -- Read-only views --

    /// The full task collection, unfiltered
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// True while a request is outstanding
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The last failure message, cleared by the next operation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The active filter
    pub fn current_filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// The active sort
    pub fn current_sort(&self) -> TaskSort {
        self.sort
    }

    /// Look up a task locally
    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks passing the current filter, in the current sort order.
    ///
    /// Pure projection over the base collection; the sort is stable so tasks
    /// with equal keys keep their relative order.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect();
        tasks.sort_by(|a, b| self.sort.compare(a, b));
        tasks
    }

    /// Filtered tasks in one column, ascending by position
    pub fn tasks_in_column(&self, column_id: &str) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.column_id == column_id && self.filter.matches(t))
            .collect();
        tasks.sort_by_key(|t| t.position);
        tasks
    }

    /// Number of tasks in a column, ignoring the filter.
    ///
    /// WIP limits count real tasks, not the visible subset.
    pub fn column_task_count(&self, column_id: &str) -> usize {
        self.tasks.iter().filter(|t| t.column_id == column_id).count()
    }

    // -- Remote operations --

    /// Replace the collection with the server's task list for the project.
    ///
    /// On transport failure the store is left empty with the error flag set;
    /// retrying is the caller's decision.
    pub async fn load_tasks(&mut self, project_id: Option<&str>) -> Result<&[Task]> {
        self.begin();
        match self.api.list_tasks(project_id).await {
            Ok(tasks) => {
                debug!(count = tasks.len(), ?project_id, "loaded tasks");
                self.tasks = tasks;
                self.loading = false;
                Ok(&self.tasks)
            }
            Err(err) => {
                self.tasks.clear();
                self.fail("failed to load tasks", err)
            }
        }
    }

    /// Create a task at the end of its target column.
    ///
    /// The position is max position in the column + 1 (0 when empty). The
    /// task is appended locally only after the server confirms; there is no
    /// optimistic create.
    pub async fn create_task(&mut self, request: CreateTaskRequest) -> Result<Task> {
        if request.title.trim().is_empty() {
            return Err(BoardError::validation("title", "must not be empty"));
        }
        self.begin();
        let position = self.next_position(&request.column_id);
        let draft = TaskDraft::from_request(request, position);
        match self.api.create_task(&draft).await {
            Ok(task) => {
                debug!(id = %task.id, column = %task.column_id, position, "created task");
                self.tasks.push(task.clone());
                self.loading = false;
                Ok(task)
            }
            Err(err) => self.fail("failed to create task", err),
        }
    }

    /// Send a partial update; on success the local entry is replaced
    /// wholesale with the server's task, which owns derived fields like
    /// `updated_at`.
    pub async fn update_task(&mut self, id: &str, request: UpdateTaskRequest) -> Result<Task> {
        self.begin();
        match self.api.update_task(id, &request).await {
            Ok(updated) => {
                if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *existing = updated.clone();
                }
                self.loading = false;
                Ok(updated)
            }
            Err(err) => self.fail("failed to update task", err),
        }
    }

    /// Delete a task, removing it locally only after the server confirms
    pub async fn delete_task(&mut self, id: &str) -> Result<()> {
        self.begin();
        match self.api.delete_task(id).await {
            Ok(()) => {
                debug!(id, "deleted task");
                self.tasks.retain(|t| t.id != id);
                self.loading = false;
                Ok(())
            }
            Err(err) => self.fail("failed to delete task", err),
        }
    }

    /// Move a task to a column position, recomputing its status from the
    /// target column
    pub async fn move_task(
        &mut self,
        task_id: &str,
        target_column_id: &str,
        target_position: usize,
    ) -> Result<Task> {
        let request = UpdateTaskRequest {
            column_id: Some(target_column_id.to_string()),
            position: Some(target_position),
            status: Some(TaskStatus::for_column(target_column_id)),
            ..Default::default()
        };
        self.update_task(task_id, request).await
    }

    /// Batch-reposition tasks, used for same-column reorder.
    ///
    /// All-or-nothing against local state: the server's returned tasks are
    /// merged by id only when the whole batch succeeds.
    pub async fn update_task_positions(
        &mut self,
        updates: Vec<PositionUpdate>,
    ) -> Result<Vec<Task>> {
        self.begin();
        match self.api.update_task_positions(&updates).await {
            Ok(updated) => {
                debug!(count = updated.len(), "repositioned tasks");
                for task in &updated {
                    if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                        *existing = task.clone();
                    }
                }
                self.loading = false;
                Ok(updated)
            }
            Err(err) => self.fail("failed to update task positions", err),
        }
    }

    // -- Optimistic move support --

    /// Apply a cross-column transfer to local state only, returning the
    /// exact inverse for rollback.
    ///
    /// Removes the task from its column's visual order, inserts it into the
    /// target order at the given index and reindexes both columns densely.
    pub fn apply_move_locally(
        &mut self,
        task_id: &str,
        target_column_id: &str,
        target_index: usize,
    ) -> Result<MoveUndo> {
        self.transfer(task_id, target_column_id, target_index)
    }

    /// Reverse a local transfer: the task goes back into its source column
    /// at its source index.
    pub fn revert_move(&mut self, undo: MoveUndo) {
        if self
            .transfer(&undo.task_id, &undo.source_column_id, undo.source_index)
            .is_err()
        {
            // The task vanished between apply and revert; nothing to restore.
            warn!(task_id = %undo.task_id, "rollback target missing");
        }
    }

    fn transfer(
        &mut self,
        task_id: &str,
        target_column_id: &str,
        target_index: usize,
    ) -> Result<MoveUndo> {
        let source_column_id = self
            .get_task(task_id)
            .map(|t| t.column_id.clone())
            .ok_or_else(|| BoardError::TaskNotFound {
                id: task_id.to_string(),
            })?;

        let source_order = self.column_order(&source_column_id);
        let source_index = source_order
            .iter()
            .position(|id| id == task_id)
            .ok_or_else(|| BoardError::TaskNotFound {
                id: task_id.to_string(),
            })?;

        let remaining: Vec<String> = source_order
            .into_iter()
            .filter(|id| id != task_id)
            .collect();
        let mut target_order: Vec<String> = self
            .column_order(target_column_id)
            .into_iter()
            .filter(|id| id != task_id)
            .collect();
        let insert_at = target_index.min(target_order.len());
        target_order.insert(insert_at, task_id.to_string());

        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.column_id = target_column_id.to_string();
        }
        self.assign_positions(&remaining);
        self.assign_positions(&target_order);

        Ok(MoveUndo {
            task_id: task_id.to_string(),
            source_column_id,
            source_index,
        })
    }

    // -- Local state management --

    /// Set the filter applied by `filtered_tasks`
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// Set the sort applied by `filtered_tasks`
    pub fn set_sort(&mut self, sort: TaskSort) {
        self.sort = sort;
    }

    /// Clear the error flag
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop all local state, e.g. when switching projects
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.loading = false;
        self.error = None;
        self.filter = TaskFilter::default();
        self.sort = TaskSort::default();
    }

    /// Remove all local tasks of a deleted column so no dangling
    /// `column_id` survives the cascade
    pub fn purge_column(&mut self, column_id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.column_id != column_id);
        let purged = before - self.tasks.len();
        if purged > 0 {
            debug!(column_id, purged, "purged tasks of deleted column");
        }
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

    fn next_position(&self, column_id: &str) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.column_id == column_id)
            .map(|t| t.position + 1)
            .max()
            .unwrap_or(0)
    }

    /// Ids of the column's visible tasks in ascending position order
    fn column_order(&self, column_id: &str) -> Vec<String> {
        self.tasks_in_column(column_id)
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    fn assign_positions(&mut self, order: &[String]) {
        for (index, id) in order.iter().enumerate() {
            if let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) {
                task.position = index;
            }
        }
    }

    /// Replace the whole collection. Test-only seam for building fixtures
    /// without a live gateway.
    #[cfg(test)]
    pub(crate) fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}
