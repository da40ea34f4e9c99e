//! Data records shared across the crate: questions, quiz settings, accounts.

mod question;
mod settings;
mod user;

pub use question::{Difficulty, Question};
pub use settings::{CATEGORIES, COUNT_CHOICES, QuizSettings, TIME_CHOICES};
pub use user::{HistoryEntry, UserAccount, UserStats};
