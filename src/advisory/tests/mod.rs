//! Unit tests for the advisory engine.

mod prompt_tests;
