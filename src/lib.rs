//! # trivia-quiz
//!
//! A terminal trivia app: sign up, pick a category and difficulty, answer
//! timed multiple-choice questions fetched from the Open Trivia Database,
//! and climb a local leaderboard. A bundled question bank keeps the whole
//! thing playable offline.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use trivia_quiz::{App, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let app = App::new(Path::new(".trivia-quiz"), false)?;
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

mod app;
mod auth;
mod data;
mod models;
mod session;
mod store;
pub mod terminal;
mod ui;

use std::io;

pub use app::App;
pub use auth::{AuthError, login, logout, signup};
pub use data::{FetchError, QuestionProvider, builtin_bank, decode_entities};
pub use models::{Difficulty, HistoryEntry, Question, QuizSettings, UserAccount, UserStats};
pub use session::{QuizSession, QuizSummary, SessionError};
pub use store::{Storage, StoreError};

/// Error type for application startup and the event loop.
#[derive(Debug)]
pub enum QuizError {
    /// Error reading or writing the state file.
    Store(StoreError),
    /// IO error from the terminal.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Store(e) => write!(f, "Failed to load saved state: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Store(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<StoreError> for QuizError {
    fn from(err: StoreError) -> Self {
        QuizError::Store(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}
