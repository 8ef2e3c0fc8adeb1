//! Reminder framing and text.

use crate::scheduling::domain::{ReminderNotice, ReminderUrgency};
use crate::task::domain::{NewTask, Priority, Task, TaskTitle, UserId};
use crate::test_support::{FixedClock, reference_now};
use chrono::TimeDelta;
use rstest::rstest;

fn due_in(delta: Option<TimeDelta>) -> Task {
    titled_due_in("Submit taxes", delta)
}

fn titled_due_in(title: &str, delta: Option<TimeDelta>) -> Task {
    let clock = FixedClock::at(reference_now());
    let mut input = NewTask::new(UserId::new(), TaskTitle::new(title).expect("title"));
    input.priority = Priority::High;
    input.deadline = delta.map(|offset| reference_now() + offset);
    Task::new(input, &clock)
}

#[rstest]
#[case(TimeDelta::minutes(90), ReminderUrgency::Urgent, 1)]
#[case(TimeDelta::hours(2), ReminderUrgency::Urgent, 2)]
#[case(TimeDelta::hours(5), ReminderUrgency::Normal, 5)]
#[case(TimeDelta::hours(-3), ReminderUrgency::Urgent, -3)]
fn urgency_follows_the_window(
    #[case] delta: TimeDelta,
    #[case] urgency: ReminderUrgency,
    #[case] hours: i64,
) {
    let notice = ReminderNotice::for_task(&due_in(Some(delta)), reference_now(), 2)
        .expect("task has a deadline");

    assert_eq!(notice.urgency(), urgency);
    assert_eq!(notice.hours_remaining(), hours);
}

#[rstest]
fn tasks_without_deadline_have_no_notice() {
    assert!(ReminderNotice::for_task(&due_in(None), reference_now(), 2).is_none());
}

#[rstest]
fn rendered_text_names_task_and_remaining_time() {
    let urgent = ReminderNotice::for_task(&due_in(Some(TimeDelta::hours(1))), reference_now(), 2)
        .expect("notice");
    let overdue = ReminderNotice::for_task(&due_in(Some(TimeDelta::hours(-4))), reference_now(), 2)
        .expect("notice");

    let urgent_text = urgent.render();
    assert!(urgent_text.starts_with("⚠️ URGENT!"));
    assert!(urgent_text.contains("📌 Submit taxes (high priority)"));
    assert!(urgent_text.contains("only 1 hour(s) left!"));
    assert!(overdue.render().contains("overdue by 4 hour(s)!"));
}

#[rstest]
#[case("fix_db_migration", "fix\\_db\\_migration")]
#[case("*ship* it", "\\*ship\\* it")]
#[case("see [docs] `now`", "see \\[docs] \\`now\\`")]
fn markdown_markers_in_titles_are_escaped(#[case] title: &str, #[case] rendered: &str) {
    let notice = ReminderNotice::for_task(
        &titled_due_in(title, Some(TimeDelta::hours(1))),
        reference_now(),
        2,
    )
    .expect("notice");

    let text = notice.render();
    assert!(text.contains(&format!("📌 {rendered} (high priority)")));
    assert!(!text.contains(title));
}
