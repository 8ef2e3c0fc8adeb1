//! Scheduling services.

mod deadline_monitor;

pub use deadline_monitor::{
    DeadlineMonitor, DeadlineMonitorConfig, MonitorError, ReminderError, SweepReport,
};
