//! Taskwise: personal task tracking core.
//!
//! This crate stores users' tasks, orders them by urgency, reminds owners
//! about imminent deadlines, and produces planning advice through a language
//! model.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP APIs)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`task`]: Users, tasks, categories and subtasks with owner-scoped storage
//! - [`scheduling`]: Priority ordering, statistics and the deadline monitor
//! - [`advisory`]: Language-model backed advice and estimates
//! - [`conversation`]: The step-by-step task creation wizard
//! - [`config`]: Startup configuration
//! - [`telemetry`]: Logging setup

pub mod advisory;
pub mod config;
pub mod conversation;
pub mod scheduling;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
