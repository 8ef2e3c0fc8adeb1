//! Advisory operation modes.

use std::fmt;

/// What kind of advice to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvisoryMode {
    /// Short productivity advice over the user's tasks.
    Advice,
    /// A plan for the working day built from pending tasks.
    DayPlan,
    /// Recommendations derived from task statistics.
    Analysis,
    /// Scheduling advice for tasks with time estimates.
    ScheduleOptimization,
}

impl AdvisoryMode {
    /// Every mode, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Advice,
        Self::DayPlan,
        Self::Analysis,
        Self::ScheduleOptimization,
    ];

    /// Returns the completion token budget.
    #[must_use]
    pub const fn max_tokens(self) -> u32 {
        match self {
            Self::Advice => 300,
            Self::Analysis => 400,
            Self::DayPlan | Self::ScheduleOptimization => 500,
        }
    }

    /// Returns how many tasks are listed in the prompt, if the list is
    /// truncated at all.
    ///
    /// Analysis only embeds aggregate counts and lists no tasks.
    #[must_use]
    pub const fn task_limit(self) -> Option<usize> {
        match self {
            Self::Advice | Self::ScheduleOptimization => Some(10),
            Self::DayPlan => Some(15),
            Self::Analysis => None,
        }
    }

    /// Returns the stable mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Advice => "advice",
            Self::DayPlan => "day_plan",
            Self::Analysis => "analysis",
            Self::ScheduleOptimization => "schedule_optimization",
        }
    }
}

impl fmt::Display for AdvisoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
