//! Outbound ports used by the scheduling services.

pub mod dispatcher;

pub use dispatcher::{DispatchError, MessageDispatcher};
