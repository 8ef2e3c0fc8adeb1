//! Prompt content and truncation.

use crate::advisory::domain::{
    AdvisoryMode, PromptContext, TaskSnapshot, breakdown_prompt, parse_minutes, render_prompt,
};
use crate::task::domain::{Priority, TaskStatus};
use crate::test_support::reference_now;
use chrono::TimeDelta;
use rstest::{fixture, rstest};

fn snapshot(title: &str, priority: Priority, status: TaskStatus) -> TaskSnapshot {
    TaskSnapshot {
        title: title.to_owned(),
        priority,
        status,
        deadline: None,
        estimated_minutes: None,
    }
}

#[fixture]
fn context() -> PromptContext {
    PromptContext {
        now: reference_now(),
        work_hours: 8,
    }
}

#[rstest]
fn advice_lists_at_most_ten_tasks(context: PromptContext) {
    let tasks: Vec<TaskSnapshot> = (0..12)
        .map(|index| snapshot(&format!("Task {index:02}"), Priority::Medium, TaskStatus::Pending))
        .collect();

    let prompt = render_prompt(AdvisoryMode::Advice, &tasks, &context).expect("render");

    assert!(prompt.contains("- Task 09 (priority: medium, status: pending)"));
    assert!(!prompt.contains("Task 10"));
    assert!(!prompt.contains("Task 11"));
}

#[rstest]
fn day_plan_keeps_pending_tasks_in_tier_order(context: PromptContext) {
    let mut dated = snapshot("High dated", Priority::High, TaskStatus::Pending);
    dated.deadline = Some(reference_now() + TimeDelta::days(2));
    dated.estimated_minutes = Some(45);
    let tasks = vec![
        snapshot("Low chore", Priority::Low, TaskStatus::Pending),
        snapshot("High undated", Priority::High, TaskStatus::Pending),
        dated,
        snapshot("Finished", Priority::Urgent, TaskStatus::Completed),
        snapshot("Started", Priority::Urgent, TaskStatus::InProgress),
    ];

    let prompt = render_prompt(AdvisoryMode::DayPlan, &tasks, &context).expect("render");

    let dated_at = prompt.find("High dated").expect("dated task listed");
    let undated_at = prompt.find("High undated").expect("undated task listed");
    let low_at = prompt.find("Low chore").expect("low task listed");
    assert!(dated_at < undated_at && undated_at < low_at);
    assert!(!prompt.contains("Finished"));
    assert!(!prompt.contains("Started"));
    assert!(prompt.contains("time: 45 min, deadline: 03.03.2026 12:00"));
    assert!(prompt.contains("time: ? min"));
    assert!(prompt.contains("8-hour plan"));
}

#[rstest]
fn analysis_embeds_statistics(context: PromptContext) {
    let mut overdue = snapshot("Late", Priority::Urgent, TaskStatus::Pending);
    overdue.deadline = Some(reference_now() - TimeDelta::hours(1));
    let tasks = vec![
        overdue,
        snapshot("Done", Priority::High, TaskStatus::Completed),
        snapshot("Open", Priority::High, TaskStatus::InProgress),
    ];

    let prompt = render_prompt(AdvisoryMode::Analysis, &tasks, &context).expect("render");

    assert!(prompt.contains("- Total tasks: 3"));
    assert!(prompt.contains("- Completed: 1"));
    assert!(prompt.contains("- Overdue: 1"));
    assert!(prompt.contains("- 🔴 Urgent: 1"));
    assert!(prompt.contains("- 🟠 High: 1"));
}

#[rstest]
#[case(300, false)]
#[case(600, true)]
fn schedule_optimisation_flags_overload(
    context: PromptContext,
    #[case] minutes: u32,
    #[case] overloaded: bool,
) {
    let mut estimated = snapshot("Estimated", Priority::High, TaskStatus::Pending);
    estimated.estimated_minutes = Some(minutes);
    let mut done = snapshot("Done", Priority::High, TaskStatus::Completed);
    done.estimated_minutes = Some(1000);
    let tasks = vec![
        estimated,
        done,
        snapshot("Unestimated", Priority::Low, TaskStatus::Pending),
    ];

    let prompt =
        render_prompt(AdvisoryMode::ScheduleOptimization, &tasks, &context).expect("render");

    assert!(prompt.contains(&format!("Workload: {minutes} minutes")));
    assert!(prompt.contains("Available time: 8 hours (480 minutes)"));
    assert!(!prompt.contains("Unestimated"));
    assert_eq!(prompt.contains("⚠️ Warning"), overloaded);
}

#[rstest]
fn schedule_optimisation_without_estimates_says_so(context: PromptContext) {
    let tasks = vec![snapshot("Vague", Priority::Low, TaskStatus::Pending)];

    let prompt =
        render_prompt(AdvisoryMode::ScheduleOptimization, &tasks, &context).expect("render");

    assert!(prompt.contains("No tasks with a time estimate"));
}

#[rstest]
fn breakdown_prompt_names_the_task() {
    let prompt = breakdown_prompt("Launch site", "static pages").expect("render");

    assert!(prompt.contains("Task: Launch site"));
    assert!(prompt.contains("Description: static pages"));
}

#[rstest]
#[case("45", Some(45))]
#[case("About 90 minutes", Some(90))]
#[case("between 20 and 40", Some(20))]
#[case("no idea", None)]
#[case("99999999999", None)]
fn minutes_come_from_the_first_integer(#[case] reply: &str, #[case] expected: Option<u32>) {
    assert_eq!(parse_minutes(reply), expected);
}
