use serde::{Deserialize, Serialize};

use super::Difficulty;

/// Trivia API category ids offered on the setup screen, with display names.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("9", "General Knowledge"),
    ("10", "Books"),
    ("11", "Film"),
    ("12", "Music"),
    ("17", "Science & Nature"),
    ("18", "Computers"),
    ("19", "Mathematics"),
    ("21", "Sports"),
    ("22", "Geography"),
    ("23", "History"),
];

/// Question counts offered on the setup screen.
pub const COUNT_CHOICES: &[usize] = &[5, 10, 15, 20];

/// Seconds per question offered on the setup screen. Zero means no countdown.
pub const TIME_CHOICES: &[u64] = &[0, 15, 30, 45, 60];

/// Configuration a quiz is started with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Trivia API category id. `None` asks for questions from any category.
    pub category: Option<String>,
    /// Requested difficulty. `None` asks for a mix.
    pub difficulty: Option<Difficulty>,
    pub num_questions: usize,
    /// Seconds allowed per question. Zero disables the countdown.
    pub time_per_question: u64,
}

impl QuizSettings {
    /// Settings used when a quiz is started directly from the bundled bank.
    pub fn offline() -> Self {
        Self {
            category: None,
            difficulty: None,
            num_questions: 10,
            time_per_question: 30,
        }
    }

    /// Display name of the configured category, `"Mixed"` when none is set.
    pub fn category_name(&self) -> String {
        self.category
            .as_deref()
            .and_then(|id| CATEGORIES.iter().find(|(cid, _)| *cid == id))
            .map(|(_, name)| (*name).to_string())
            .unwrap_or_else(|| "Mixed".to_string())
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            category: None,
            difficulty: None,
            num_questions: 10,
            time_per_question: 30,
        }
    }
}
