//! Pure scheduling rules over task state and a fixed "now".

mod priority;
mod reminder;
mod statistics;

pub use priority::{Schedulable, day_plan_order, days_until, display_order, priority_score};
pub use reminder::{ReminderNotice, ReminderUrgency};
pub use statistics::{PriorityBreakdown, TaskStatistics};
