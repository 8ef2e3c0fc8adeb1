//! Read-only task statistics.

use super::Schedulable;
use crate::task::domain::{Priority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counts of not-yet-completed tasks per priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriorityBreakdown {
    /// Open urgent tasks.
    pub urgent: usize,
    /// Open high-priority tasks.
    pub high: usize,
    /// Open medium-priority tasks.
    pub medium: usize,
    /// Open low-priority tasks.
    pub low: usize,
}

impl PriorityBreakdown {
    fn count(&mut self, priority: Priority) {
        let slot = match priority {
            Priority::Urgent => &mut self.urgent,
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        };
        *slot += 1;
    }
}

/// Aggregate counts over one user's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TaskStatistics {
    /// All tasks.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Pending tasks.
    pub pending: usize,
    /// Pending tasks whose deadline has passed.
    pub overdue: usize,
    /// Completed share in percent, rounded to one decimal; `0.0` without
    /// tasks.
    pub completion_rate: f64,
    /// Open tasks per tier.
    pub open_by_priority: PriorityBreakdown,
}

impl TaskStatistics {
    /// Computes statistics over `tasks` as seen at `now`.
    #[must_use]
    pub fn compute<'a, T, I>(tasks: I, now: DateTime<Utc>) -> Self
    where
        T: Schedulable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut stats = Self::default();
        for task in tasks {
            stats.total += 1;
            match task.status() {
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Pending => {
                    stats.pending += 1;
                    if task.deadline().is_some_and(|deadline| deadline < now) {
                        stats.overdue += 1;
                    }
                }
                TaskStatus::InProgress | TaskStatus::Cancelled => {}
            }
            if task.status() != TaskStatus::Completed {
                stats.open_by_priority.count(task.priority());
            }
        }
        stats.completion_rate = completion_rate(stats.completed, stats.total);
        stats
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "task counts are far below f64 precision and the rate is display-only"
)]
fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = completed as f64 / total as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}
