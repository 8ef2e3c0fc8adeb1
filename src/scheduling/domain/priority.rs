//! Priority scoring and task orderings.
//!
//! Scores sort ascending: a lower score means the task is shown earlier.

use crate::task::domain::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};

/// Score distance between adjacent priority tiers.
const TIER_WEIGHT: i64 = 1000;
/// Deadlines further out than this many days all score the same.
const DEADLINE_HORIZON_DAYS: i64 = 30;
/// Score added per day until the deadline.
const DAY_WEIGHT: i64 = 10;
/// Score removed for tasks already in progress.
const IN_PROGRESS_BONUS: i64 = 5;
const SECONDS_PER_DAY: i64 = 86_400;

/// Read access to the task fields the scheduling rules depend on.
pub trait Schedulable {
    /// Lifecycle status.
    fn status(&self) -> TaskStatus;
    /// Priority tier.
    fn priority(&self) -> Priority;
    /// Deadline, if any.
    fn deadline(&self) -> Option<DateTime<Utc>>;
}

impl Schedulable for Task {
    fn status(&self) -> TaskStatus {
        Self::status(self)
    }

    fn priority(&self) -> Priority {
        Self::priority(self)
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        Self::deadline(self)
    }
}

impl<T: Schedulable + ?Sized> Schedulable for &T {
    fn status(&self) -> TaskStatus {
        (**self).status()
    }

    fn priority(&self) -> Priority {
        (**self).priority()
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        (**self).deadline()
    }
}

/// Whole days from `now` until `deadline`, rounded towards negative infinity.
///
/// A deadline one hour in the past is day `-1`; one 23 hours ahead is day `0`.
#[must_use]
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Computes the display priority score of a task.
///
/// The tier sets the base (`rank × 1000`), a deadline adds ten points per
/// remaining day clamped to `0..=30`, and in-progress work gets five points
/// off.
#[must_use]
pub fn priority_score(task: &impl Schedulable, now: DateTime<Utc>) -> i64 {
    let mut score = i64::from(task.priority().rank()) * TIER_WEIGHT;
    if let Some(deadline) = task.deadline() {
        score += days_until(deadline, now).clamp(0, DEADLINE_HORIZON_DAYS) * DAY_WEIGHT;
    }
    if task.status() == TaskStatus::InProgress {
        score -= IN_PROGRESS_BONUS;
    }
    score
}

/// Orders tasks for list display by ascending [`priority_score`].
///
/// Equal scores fall back to the earlier deadline, with undated tasks last.
/// The sort is stable, so remaining ties keep their input order, which is
/// newest first when the input comes straight from the store.
#[must_use]
pub fn display_order<T: Schedulable>(mut tasks: Vec<T>, now: DateTime<Utc>) -> Vec<T> {
    tasks.sort_by_key(|task| (priority_score(task, now), deadline_or_never(task)));
    tasks
}

/// Orders tasks for day planning.
///
/// Keeps pending tasks only and sorts them by tier rank, then by deadline with
/// undated tasks last. Deadline proximity is not blended into the tier here.
/// The sort is stable.
#[must_use]
pub fn day_plan_order<T: Schedulable>(tasks: Vec<T>) -> Vec<T> {
    let mut pending: Vec<T> = tasks
        .into_iter()
        .filter(|task| task.status() == TaskStatus::Pending)
        .collect();
    pending.sort_by_key(|task| (task.priority().rank(), deadline_or_never(task)));
    pending
}

fn deadline_or_never(task: &impl Schedulable) -> DateTime<Utc> {
    task.deadline().unwrap_or(DateTime::<Utc>::MAX_UTC)
}
