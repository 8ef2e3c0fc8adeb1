//! Unit tests for prioritisation and deadline scheduling.

mod monitor_tests;
mod reminder_tests;
mod statistics_tests;
