//! Advisory orchestration.

mod engine;

pub use engine::{
    AdvisoryEngine, DEFAULT_ESTIMATE_MINUTES, FAILURE_MESSAGE, NOT_CONFIGURED_MESSAGE,
};
