//! Step-by-step task creation over a chat conversation.
//!
//! Each user has at most one draft in flight. The draft walks through title,
//! description, priority, category and deadline; nothing is written until the
//! deadline step completes, and cancelling discards the draft.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
