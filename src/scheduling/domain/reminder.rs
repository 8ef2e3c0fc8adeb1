//! Deadline reminder notices.

use crate::task::domain::{Priority, Task};
use chrono::{DateTime, Utc};

/// Framing of a reminder; affects only the notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderUrgency {
    /// The deadline is at most the urgent window away, or already passed.
    Urgent,
    /// The deadline is further away.
    Normal,
}

/// Notification about an approaching task deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotice {
    title: String,
    priority: Priority,
    hours_remaining: i64,
    urgency: ReminderUrgency,
}

impl ReminderNotice {
    /// Builds the notice for `task` as seen at `now`.
    ///
    /// Hours remaining are whole hours truncated towards zero and negative
    /// once the deadline has passed. Returns `None` for tasks without a
    /// deadline.
    #[must_use]
    pub fn for_task(task: &Task, now: DateTime<Utc>, urgent_within_hours: i64) -> Option<Self> {
        let deadline = task.deadline()?;
        let hours_remaining = (deadline - now).num_hours();
        let urgency = if hours_remaining <= urgent_within_hours {
            ReminderUrgency::Urgent
        } else {
            ReminderUrgency::Normal
        };
        Some(Self {
            title: task.title().as_str().to_owned(),
            priority: task.priority(),
            hours_remaining,
            urgency,
        })
    }

    /// Returns the whole hours left until the deadline.
    #[must_use]
    pub const fn hours_remaining(&self) -> i64 {
        self.hours_remaining
    }

    /// Returns the framing.
    #[must_use]
    pub const fn urgency(&self) -> ReminderUrgency {
        self.urgency
    }

    /// Renders the Markdown message text.
    #[must_use]
    pub fn render(&self) -> String {
        let header = match self.urgency {
            ReminderUrgency::Urgent => "⚠️ URGENT! ⏰ *Task reminder*",
            ReminderUrgency::Normal => "⏰ *Task reminder*",
        };
        let remaining = match (self.urgency, self.hours_remaining) {
            (_, hours) if hours < 0 => format!("overdue by {} hour(s)!", hours.unsigned_abs()),
            (ReminderUrgency::Urgent, hours) => format!("only {hours} hour(s) left!"),
            (ReminderUrgency::Normal, hours) => format!("in {hours} hour(s)"),
        };
        // Legacy Markdown cannot escape inside an entity, so the title stays plain.
        format!(
            "{header}\n\n📌 {title} ({priority} priority)\n\n⏰ Deadline: {remaining}",
            title = escape_markdown(&self.title),
            priority = self.priority.as_str(),
        )
    }
}

/// Escapes the characters legacy Telegram Markdown treats as entity markers.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        if matches!(character, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}
