//! Drag-drop reconciler: turns a completed drag gesture into store
//! mutations and remote calls.
//!
//! Two shapes of gesture exist. A same-column reorder is a splice of the
//! column's visual order submitted as one batch reposition, with the store
//! applying the server's result. A cross-column move is optimistic:
//! the WIP limit is checked before anything is touched, the transfer is
//! applied locally, and a failed commit is rolled back by the exact inverse
//! so the card lands back in its source column at its source index.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{BoardError, Result};
use crate::store::{BoardStore, TaskStore};
use crate::types::{DragDropEvent, PositionUpdate};

/// Reconciles drag gestures against the stores.
///
/// Carries a per-task in-flight set: a second move for a task whose commit
/// is still outstanding is rejected without touching any state.
#[derive(Debug, Default)]
pub struct Reconciler {
    in_flight: HashSet<String>,
}

impl Reconciler {
    /// Create a reconciler with no moves in flight
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a move for this task is outstanding
    pub fn is_move_in_flight(&self, task_id: &str) -> bool {
        self.in_flight.contains(task_id)
    }

    /// Handle a completed drag gesture
    pub async fn handle_drop(
        &mut self,
        event: &DragDropEvent,
        tasks: &mut TaskStore,
        board: &BoardStore,
    ) -> Result<()> {
        if event.is_reorder() {
            self.reorder_within_column(event, tasks).await
        } else {
            self.move_between_columns(event, tasks, board).await
        }
    }

    /// Splice the column's order and submit the full re-indexing as one
    /// batch. The resulting positions are 0..n-1 in the final visual order.
    async fn reorder_within_column(
        &mut self,
        event: &DragDropEvent,
        tasks: &mut TaskStore,
    ) -> Result<()> {
        let mut order: Vec<String> = tasks
            .tasks_in_column(&event.source_column_id)
            .iter()
            .map(|t| t.id.clone())
            .collect();

        if event.source_index >= order.len() {
            return Err(BoardError::validation("sourceIndex", "out of range"));
        }
        if order[event.source_index] != event.task_id {
            return Err(BoardError::validation(
                "taskId",
                "does not match the card at sourceIndex",
            ));
        }

        let moved = order.remove(event.source_index);
        let insert_at = event.target_index.min(order.len());
        order.insert(insert_at, moved);

        let updates: Vec<PositionUpdate> = order
            .into_iter()
            .enumerate()
            .map(|(position, id)| PositionUpdate {
                id,
                position,
                column_id: Some(event.source_column_id.clone()),
            })
            .collect();

        debug!(
            column = %event.source_column_id,
            from = event.source_index,
            to = event.target_index,
            "reordering column"
        );
        tasks.update_task_positions(updates).await?;
        Ok(())
    }

    /// Optimistic cross-column move with rollback on a failed commit
    async fn move_between_columns(
        &mut self,
        event: &DragDropEvent,
        tasks: &mut TaskStore,
        board: &BoardStore,
    ) -> Result<()> {
        if self.in_flight.contains(&event.task_id) {
            return Err(BoardError::MoveInFlight {
                id: event.task_id.clone(),
            });
        }

        // Constraint check first: a rejected drop must leave zero mutation
        // behind and issue zero network calls.
        if !board.check_wip_limit(tasks, &event.target_column_id, 1) {
            let limit = board
                .column(&event.target_column_id)
                .and_then(|c| c.wip_limit)
                .unwrap_or(0);
            return Err(BoardError::WipLimitExceeded {
                column_id: event.target_column_id.clone(),
                limit,
                count: tasks.column_task_count(&event.target_column_id),
            });
        }

        let undo = tasks.apply_move_locally(
            &event.task_id,
            &event.target_column_id,
            event.target_index,
        )?;

        self.in_flight.insert(event.task_id.clone());
        let result = tasks
            .move_task(&event.task_id, &event.target_column_id, event.target_index)
            .await;
        self.in_flight.remove(&event.task_id);

        match result {
            Ok(task) => {
                debug!(
                    task_id = %task.id,
                    column = %task.column_id,
                    position = task.position,
                    "move committed"
                );
                Ok(())
            }
            Err(err) => {
                warn!(task_id = %event.task_id, error = %err, "move failed, rolling back");
                tasks.revert_move(undo);
                Err(err)
            }
        }
    }
}
