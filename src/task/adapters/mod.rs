//! Adapter implementations for the entity store ports.

pub mod memory;
pub mod postgres;
