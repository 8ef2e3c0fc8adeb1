//! Message dispatcher adapters.

mod memory;
mod telegram;

pub use memory::{InMemoryDispatcher, SentMessage};
pub use telegram::{TelegramConfig, TelegramDispatcher};
