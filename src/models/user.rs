use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed quiz in a user's history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Category display name, `"Mixed"` when the quiz had no category filter.
    pub category: String,
    /// Percentage scored on the quiz.
    pub score: u32,
    pub date: DateTime<Utc>,
    /// Points awarded for the quiz.
    pub points: u32,
}

/// Lifetime statistics accumulated per account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_quizzes: u32,
    /// Sum of all quiz percentages, kept for the average.
    #[serde(default)]
    pub total_score: u32,
    /// Best single-quiz percentage.
    #[serde(default)]
    pub best_score: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub quiz_history: Vec<HistoryEntry>,
}

impl UserStats {
    /// Average percentage across completed quizzes, zero when there are none.
    pub fn average_score(&self) -> u32 {
        if self.total_quizzes == 0 {
            return 0;
        }
        ((self.total_score as f64 / self.total_quizzes as f64).round()) as u32
    }
}

/// A stored account. Passwords are kept and compared as plain text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub stats: UserStats,
}

impl UserAccount {
    /// New account with zeroed statistics.
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            created_at: Utc::now(),
            stats: UserStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_score() {
        let mut stats = UserStats::default();
        assert_eq!(stats.average_score(), 0);

        stats.total_quizzes = 3;
        stats.total_score = 80 + 90 + 75;
        assert_eq!(stats.average_score(), 82); // 81.67 rounds up
    }

    #[test]
    fn test_account_roundtrip() {
        let account = UserAccount::new("alice", "alice@example.com", "hunter2");
        let json = serde_json::to_string(&account).unwrap();
        let back: UserAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
        assert_eq!(back.stats, UserStats::default());
    }

    #[test]
    fn test_stats_fields_default_when_missing() {
        // Records written before a field existed still deserialize.
        let account: UserAccount = serde_json::from_str(
            r#"{
                "username": "bob",
                "email": "bob@example.com",
                "password": "pw",
                "created_at": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(account.stats.points, 0);
        assert!(account.stats.quiz_history.is_empty());
    }
}
