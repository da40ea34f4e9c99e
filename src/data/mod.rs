//! Question sourcing: remote trivia API plus the bundled offline bank.

mod bank;
mod provider;

pub use bank::builtin_bank;
pub use provider::{FetchError, QuestionProvider, decode_entities};
