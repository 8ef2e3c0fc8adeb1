//! Statistics aggregation.

use crate::scheduling::domain::{PriorityBreakdown, TaskStatistics};
use crate::task::domain::{NewTask, Priority, Task, TaskStatus, TaskTitle, UserId};
use crate::test_support::{FixedClock, reference_now};
use chrono::TimeDelta;
use rstest::rstest;

fn task(
    clock: &FixedClock,
    priority: Priority,
    status: TaskStatus,
    due: Option<TimeDelta>,
) -> Task {
    let mut input = NewTask::new(UserId::new(), TaskTitle::new("Counted").expect("title"));
    input.priority = priority;
    input.deadline = due.map(|delta| reference_now() + delta);
    let mut built = Task::new(input, clock);
    built.change_status(status, clock);
    built
}

#[rstest]
fn no_tasks_yield_zero_rate() {
    let stats = TaskStatistics::compute(&Vec::<Task>::new(), reference_now());

    assert_eq!(stats, TaskStatistics::default());
}

#[rstest]
#[expect(clippy::float_cmp, reason = "rate is rounded to one decimal")]
fn rate_is_rounded_to_one_decimal() {
    let clock = FixedClock::at(reference_now());
    let tasks = vec![
        task(&clock, Priority::Low, TaskStatus::Completed, None),
        task(&clock, Priority::Low, TaskStatus::Pending, None),
        task(&clock, Priority::Low, TaskStatus::Pending, None),
    ];

    let stats = TaskStatistics::compute(&tasks, reference_now());

    assert_eq!(stats.completion_rate, 33.3);
}

#[rstest]
fn overdue_counts_only_pending_tasks() {
    let clock = FixedClock::at(reference_now());
    let past = Some(TimeDelta::hours(-3));
    let tasks = vec![
        task(&clock, Priority::Urgent, TaskStatus::Pending, past),
        task(&clock, Priority::High, TaskStatus::InProgress, past),
        task(&clock, Priority::Medium, TaskStatus::Completed, past),
        task(&clock, Priority::Low, TaskStatus::Pending, Some(TimeDelta::hours(3))),
        task(&clock, Priority::Low, TaskStatus::Cancelled, None),
    ];

    let stats = TaskStatistics::compute(&tasks, reference_now());

    assert_eq!(stats.total, 5);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.overdue, 1);
    assert_eq!(
        stats.open_by_priority,
        PriorityBreakdown {
            urgent: 1,
            high: 1,
            medium: 0,
            low: 2,
        }
    );
}
