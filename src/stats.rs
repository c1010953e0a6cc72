//! Board statistics: pure aggregation over a task slice.
//!
//! Everything here is computed from the tasks alone plus an explicit `today`
//! boundary, so results are reproducible in tests. `board_stats_now` is the
//! wall-clock convenience wrapper.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use crate::types::{Task, TaskPriority, TaskStatus, TaskType};

/// Aggregated counts and timings for one set of tasks
#[derive(Debug, Clone, PartialEq)]
pub struct BoardStats {
    pub total_tasks: usize,
    pub tasks_by_status: HashMap<TaskStatus, usize>,
    pub tasks_by_priority: HashMap<TaskPriority, usize>,
    pub tasks_by_type: HashMap<TaskType, usize>,
    /// Tasks past their due date and not done
    pub overdue_tasks: usize,
    /// Tasks due today and not done
    pub due_today_tasks: usize,
    /// Mean days from creation to last update of done tasks, rounded to one
    /// decimal. `None` when no task is done.
    pub average_completion_time: Option<f64>,
}

/// Compute stats with `today` as the overdue/due-today boundary
pub fn board_stats(tasks: &[Task], today: NaiveDate) -> BoardStats {
    let mut tasks_by_status: HashMap<TaskStatus, usize> = HashMap::new();
    let mut tasks_by_priority: HashMap<TaskPriority, usize> = HashMap::new();
    let mut tasks_by_type: HashMap<TaskType, usize> = HashMap::new();
    let mut overdue_tasks = 0;
    let mut due_today_tasks = 0;

    for task in tasks {
        *tasks_by_status.entry(task.status).or_insert(0) += 1;
        *tasks_by_priority.entry(task.priority).or_insert(0) += 1;
        *tasks_by_type.entry(task.task_type).or_insert(0) += 1;

        if let Some(due) = task.due_date {
            if due < today {
                overdue_tasks += 1;
            } else if due == today {
                due_today_tasks += 1;
            }
        }
    }

    BoardStats {
        total_tasks: tasks.len(),
        tasks_by_status,
        tasks_by_priority,
        tasks_by_type,
        overdue_tasks,
        due_today_tasks,
        average_completion_time: average_completion_days(tasks),
    }
}

/// Compute stats against the local calendar date
pub fn board_stats_now(tasks: &[Task]) -> BoardStats {
    board_stats(tasks, Local::now().date_naive())
}

/// Mean completion time of done tasks in whole days, one decimal.
///
/// Each task contributes the elapsed time between creation and its last
/// update, rounded up to full days so a same-day completion counts as one.
fn average_completion_days(tasks: &[Task]) -> Option<f64> {
    let mut total_days: u64 = 0;
    let mut done = 0u64;
    for task in tasks.iter().filter(|t| t.status == TaskStatus::Done) {
        let elapsed = task.updated_at.signed_duration_since(task.created_at);
        let seconds = elapsed.num_seconds().max(0) as u64;
        total_days += seconds.div_ceil(86_400);
        done += 1;
    }
    if done == 0 {
        return None;
    }
    let mean = total_days as f64 / done as f64;
    Some((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, 12, 0, 0).unwrap()
    }

    fn done_task(id: &str, created: u32, updated: u32) -> Task {
        let mut task = Task::new(id, "t", "p1", "done", 0).with_status(TaskStatus::Done);
        task.created_at = day(created);
        task.updated_at = day(updated);
        task
    }

    #[test]
    fn test_empty_slice() {
        let stats = board_stats(&[], NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.overdue_tasks, 0);
        assert_eq!(stats.average_completion_time, None);
        assert!(stats.tasks_by_status.is_empty());
    }

    #[test]
    fn test_counts_by_dimension() {
        let tasks = vec![
            Task::new("t1", "a", "p1", "todo", 0).with_priority(TaskPriority::High),
            Task::new("t2", "b", "p1", "todo", 1).with_type(TaskType::Bug),
            Task::new("t3", "c", "p1", "done", 0).with_status(TaskStatus::Done),
        ];
        let stats = board_stats(&tasks, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.tasks_by_status[&TaskStatus::Todo], 2);
        assert_eq!(stats.tasks_by_status[&TaskStatus::Done], 1);
        assert_eq!(stats.tasks_by_priority[&TaskPriority::High], 1);
        assert_eq!(stats.tasks_by_type[&TaskType::Bug], 1);
        assert_eq!(stats.tasks_by_type[&TaskType::Task], 2);
    }

    #[test]
    fn test_overdue_and_due_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let tasks = vec![
            Task::new("t1", "late", "p1", "todo", 0)
                .with_due_date(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()),
            Task::new("t2", "today", "p1", "todo", 1).with_due_date(today),
            Task::new("t3", "future", "p1", "todo", 2)
                .with_due_date(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()),
            Task::new("t4", "undated", "p1", "todo", 3),
        ];
        let stats = board_stats(&tasks, today);
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.due_today_tasks, 1);
    }

    #[test]
    fn test_due_date_counts_are_status_blind() {
        // The counts go purely by due date; a done task with a stale due
        // date is still overdue.
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let tasks = vec![
            Task::new("t1", "shipped late", "p1", "done", 0)
                .with_status(TaskStatus::Done)
                .with_due_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
            Task::new("t2", "shipped on time", "p1", "done", 1)
                .with_status(TaskStatus::Done)
                .with_due_date(today),
        ];
        let stats = board_stats(&tasks, today);
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.due_today_tasks, 1);
    }

    #[test]
    fn test_average_completion_mixed_durations() {
        // Three and five elapsed days average to 4.0
        let tasks = vec![done_task("t1", 1, 4), done_task("t2", 1, 6)];
        let stats = board_stats(&tasks, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(stats.average_completion_time, Some(4.0));
    }

    #[test]
    fn test_average_completion_rounds_partial_days_up() {
        // 2.5 elapsed days counts as 3
        let mut task = Task::new("t1", "t", "p1", "done", 0).with_status(TaskStatus::Done);
        task.created_at = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        task.updated_at = Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap();
        let stats = board_stats(&[task], NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(stats.average_completion_time, Some(3.0));
    }

    #[test]
    fn test_average_completion_one_decimal() {
        // 1 + 2 + 4 days over three tasks is 2.333.., reported as 2.3
        let tasks = vec![
            done_task("t1", 1, 2),
            done_task("t2", 1, 3),
            done_task("t3", 1, 5),
        ];
        let stats = board_stats(&tasks, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(stats.average_completion_time, Some(2.3));
    }

    #[test]
    fn test_no_done_tasks_means_no_average() {
        let tasks = vec![Task::new("t1", "a", "p1", "todo", 0)];
        let stats = board_stats(&tasks, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(stats.average_completion_time, None);
    }
}
