//! Task prioritisation and deadline scheduling.
//!
//! - [`domain`]: the priority scorer, the two named task orderings, the
//!   statistics aggregator and reminder notices
//! - [`ports`]: the outbound messaging contract
//! - [`adapters`]: Telegram and in-memory dispatchers
//! - [`services`]: the periodic deadline monitor

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
