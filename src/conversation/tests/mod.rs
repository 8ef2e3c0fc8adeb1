//! Unit tests for the task creation wizard.

mod draft_tests;
