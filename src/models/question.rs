use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty rating carried by a question, or requested for a quiz.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// No rating. Also absorbs any rating this build does not know.
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Difficulty {
    /// Value for the trivia API `difficulty` query parameter.
    pub fn api_param(self) -> Option<&'static str> {
        match self {
            Difficulty::Easy => Some("easy"),
            Difficulty::Medium => Some("medium"),
            Difficulty::Hard => Some("hard"),
            Difficulty::Unspecified => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unspecified => "Any",
        };
        write!(f, "{}", label)
    }
}

/// A single multiple-choice question.
///
/// The correct answer is kept apart from the wrong ones; the presentation
/// shuffles all four together each time the question is shown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub correct: String,
    pub incorrect: [String; 3],
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}
