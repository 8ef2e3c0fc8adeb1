//! Advisory domain: modes, task snapshots and prompt rendering.

mod mode;
mod prompt;
mod snapshot;

pub use mode::AdvisoryMode;
pub use prompt::{
    PromptContext, PromptError, breakdown_prompt, estimate_prompt, parse_minutes, render_prompt,
};
pub use snapshot::TaskSnapshot;
