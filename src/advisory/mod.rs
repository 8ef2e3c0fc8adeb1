//! Language-model backed productivity advice.
//!
//! The engine turns a snapshot of a user's tasks into a prompt, asks the
//! configured language model, and always answers with text: a fixed message
//! when no model is configured and a generic one when the call fails.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
