//! Prompt templates and reply parsing.
//!
//! Templates are rendered with `minijinja`. Task lists are truncated to the
//! mode's limit before rendering; callers should not assume every task is
//! seen by the model.

use super::{AdvisoryMode, TaskSnapshot};
use crate::scheduling::domain::{TaskStatistics, day_plan_order};
use crate::task::domain::TaskStatus;
use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;

const DEADLINE_FORMAT: &str = "%d.%m.%Y %H:%M";

const ADVICE_TEMPLATE: &str = "\
You are a helpful productivity assistant. The user has the following tasks:

{% for task in tasks -%}
- {{ task.title }} (priority: {{ task.priority }}, status: {{ task.status }})
{% endfor %}
Give short, practical advice (2-3 sentences) on improving productivity.";

const DAY_PLAN_TEMPLATE: &str = "\
Create an optimal {{ work_hours }}-hour plan for the day from these tasks:

{% for task in tasks -%}
- {{ task.title }} (priority: {{ task.priority }}, time: {% if task.estimate is not none %}{{ task.estimate }}{% else %}?{% endif %} min{% if task.deadline %}, deadline: {{ task.deadline }}{% endif %})
{% endfor %}
Consider:
1. Urgent and important tasks first
2. Alternate hard and easy tasks
3. Include short breaks every 2 hours
4. Be realistic about time

Answer in this format:
📅 Plan for the day:

🌅 Morning (9:00 - 12:00)
- [task]

🌞 Afternoon (13:00 - 17:00)
- [task]

🌆 Evening (17:00 - 18:00)
- [task]

💡 Tip: [short tip]";

const ANALYSIS_TEMPLATE: &str = "\
Analyse the state of the user's tasks and give recommendations:

📊 Statistics:
- Total tasks: {{ stats.total }}
- Completed: {{ stats.completed }}
- Pending: {{ stats.pending }}
- Overdue: {{ stats.overdue }}
- Completion rate: {{ stats.completion_rate }}%

By priority (not completed):
- 🔴 Urgent: {{ stats.open_by_priority.urgent }}
- 🟠 High: {{ stats.open_by_priority.high }}
- 🟡 Medium: {{ stats.open_by_priority.medium }}
- 🟢 Low: {{ stats.open_by_priority.low }}

Give 3-5 concrete recommendations for improving productivity.";

const SCHEDULE_TEMPLATE: &str = "\
Help optimise the task schedule:

⏰ Available time: {{ work_hours }} hours ({{ available_minutes }} minutes)
⏱️ Workload: {{ total_minutes }} minutes

Tasks:
{% for task in tasks -%}
- {{ task.title }} ({{ task.estimate }} min, priority: {{ task.priority }})
{% else -%}
No tasks with a time estimate
{% endfor %}
{% if overloaded -%}
⚠️ Warning: there is more work than fits into the available time!
{%- else -%}
✅ All tasks fit into the available time
{%- endif %}

Recommend:
1. Which tasks to do today
2. What can be delegated or postponed
3. How to group tasks for efficiency

Answer briefly and to the point.";

const BREAKDOWN_TEMPLATE: &str = "\
Break the following task down into concrete subtasks:

Task: {{ title }}
Description: {{ description }}

Create 3-7 subtasks in the format:
1. [subtask]
2. [subtask]
...

Each subtask should be:
- Concrete and measurable
- Doable in 15-60 minutes
- Independent of the others where possible

Reply with the list of subtasks only.";

const ESTIMATE_TEMPLATE: &str = "\
Estimate how long this task takes, in minutes.

Task: {{ title }}
Description: {{ description }}

Take into account:
- Average working speed
- Any research or learning needed
- Possible delays

Reply with a number of minutes only, without any other text.";

#[expect(clippy::expect_used, reason = "the pattern is a valid literal")]
static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern compiles"));

/// Ambient values the prompts depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptContext {
    /// Reference instant for overdue and statistics computations.
    pub now: DateTime<Utc>,
    /// Length of the user's working day in hours.
    pub work_hours: u32,
}

/// Failure to render a prompt template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {prompt} prompt: {reason}")]
pub struct PromptError {
    /// Which prompt failed.
    pub prompt: &'static str,
    /// Renderer message.
    pub reason: String,
}

#[derive(Debug, Serialize)]
struct TaskLine<'a> {
    title: &'a str,
    priority: &'static str,
    status: &'static str,
    deadline: Option<String>,
    estimate: Option<u32>,
}

impl<'a> From<&'a TaskSnapshot> for TaskLine<'a> {
    fn from(task: &'a TaskSnapshot) -> Self {
        Self {
            title: &task.title,
            priority: task.priority.as_str(),
            status: task.status.as_str(),
            deadline: task
                .deadline
                .map(|deadline| deadline.format(DEADLINE_FORMAT).to_string()),
            estimate: task.estimated_minutes,
        }
    }
}

/// Renders the prompt for an advisory mode.
///
/// # Errors
///
/// Returns [`PromptError`] when the template fails to render.
pub fn render_prompt(
    mode: AdvisoryMode,
    tasks: &[TaskSnapshot],
    context: &PromptContext,
) -> Result<String, PromptError> {
    let limit = mode.task_limit().unwrap_or(usize::MAX);
    match mode {
        AdvisoryMode::Advice => {
            let lines = task_lines(tasks.iter(), limit);
            render(mode.as_str(), ADVICE_TEMPLATE, context! { tasks => lines })
        }
        AdvisoryMode::DayPlan => {
            let ordered = day_plan_order(tasks.iter().collect());
            let lines = task_lines(ordered.into_iter(), limit);
            render(
                mode.as_str(),
                DAY_PLAN_TEMPLATE,
                context! { tasks => lines, work_hours => context.work_hours },
            )
        }
        AdvisoryMode::Analysis => {
            let stats = TaskStatistics::compute(tasks, context.now);
            render(mode.as_str(), ANALYSIS_TEMPLATE, context! { stats => stats })
        }
        AdvisoryMode::ScheduleOptimization => {
            let estimated: Vec<&TaskSnapshot> = tasks
                .iter()
                .filter(|task| task.status != TaskStatus::Completed)
                .filter(|task| task.estimated_minutes.is_some_and(|minutes| minutes > 0))
                .collect();
            let total_minutes: u64 = estimated
                .iter()
                .filter_map(|task| task.estimated_minutes)
                .map(u64::from)
                .sum();
            let available_minutes = u64::from(context.work_hours) * 60;
            let lines = task_lines(estimated.into_iter(), limit);
            render(
                mode.as_str(),
                SCHEDULE_TEMPLATE,
                context! {
                    tasks => lines,
                    work_hours => context.work_hours,
                    available_minutes => available_minutes,
                    total_minutes => total_minutes,
                    overloaded => total_minutes > available_minutes,
                },
            )
        }
    }
}

/// Renders the prompt asking for a subtask breakdown.
///
/// # Errors
///
/// Returns [`PromptError`] when the template fails to render.
pub fn breakdown_prompt(title: &str, description: &str) -> Result<String, PromptError> {
    render(
        "breakdown",
        BREAKDOWN_TEMPLATE,
        context! { title => title, description => description },
    )
}

/// Renders the prompt asking for a duration estimate.
///
/// # Errors
///
/// Returns [`PromptError`] when the template fails to render.
pub fn estimate_prompt(title: &str, description: &str) -> Result<String, PromptError> {
    render(
        "estimate",
        ESTIMATE_TEMPLATE,
        context! { title => title, description => description },
    )
}

/// Extracts the first run of digits in a model reply as minutes.
///
/// Returns `None` when the reply holds no integer or it does not fit `u32`.
#[must_use]
pub fn parse_minutes(reply: &str) -> Option<u32> {
    FIRST_INTEGER
        .find(reply)
        .and_then(|found| found.as_str().parse().ok())
}

fn task_lines<'a>(tasks: impl Iterator<Item = &'a TaskSnapshot>, limit: usize) -> Vec<TaskLine<'a>> {
    tasks.take(limit).map(TaskLine::from).collect()
}

fn render(
    prompt: &'static str,
    template: &str,
    values: minijinja::Value,
) -> Result<String, PromptError> {
    Environment::new()
        .render_str(template, values)
        .map_err(|err| PromptError {
            prompt,
            reason: err.to_string(),
        })
}
