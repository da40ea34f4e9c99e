//! Point calculation and statistics reconciliation.
//!
//! `award` is a pure function of a quiz summary; `reconcile` folds one
//! finished quiz into an account's statistics in a single mutation, so the
//! caller's read-modify-write of the stored record stays one step.

use chrono::Utc;

use super::QuizSummary;
use crate::models::{Difficulty, HistoryEntry, UserStats};

/// Most recent quizzes kept per account.
pub const HISTORY_LIMIT: usize = 10;

/// Points earned for a finished quiz.
///
/// Ten points per percentage point, a bonus for finishing fast, then a
/// difficulty multiplier. All arithmetic rounds down.
pub fn award(summary: &QuizSummary, difficulty: Difficulty) -> u32 {
    let mut points = summary.percentage * 10;
    points += match summary.elapsed_seconds {
        0..=59 => 50,
        60..=119 => 25,
        120..=179 => 10,
        _ => 0,
    };
    match difficulty {
        Difficulty::Hard => points * 2,
        Difficulty::Medium => points * 3 / 2,
        Difficulty::Easy | Difficulty::Unspecified => points,
    }
}

/// Fold a finished quiz into the user's statistics.
///
/// Appends a dated history entry and drops the oldest entries beyond
/// [`HISTORY_LIMIT`]. The caller persists the updated record afterwards.
pub fn reconcile(stats: &mut UserStats, summary: &QuizSummary, points: u32, category: &str) {
    stats.total_quizzes += 1;
    stats.total_score += summary.percentage;
    stats.best_score = stats.best_score.max(summary.percentage);
    stats.points += points;
    stats.quiz_history.push(HistoryEntry {
        category: category.to_string(),
        score: summary.percentage,
        date: Utc::now(),
        points,
    });
    if stats.quiz_history.len() > HISTORY_LIMIT {
        let excess = stats.quiz_history.len() - HISTORY_LIMIT;
        stats.quiz_history.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(percentage: u32, elapsed_seconds: u64) -> QuizSummary {
        QuizSummary {
            total_questions: 10,
            score: percentage as usize / 10,
            percentage,
            elapsed_seconds,
        }
    }

    #[test]
    fn test_award_hard_quiz_with_speed_bonus() {
        // (100 * 10 + 50) * 2
        assert_eq!(award(&summary(100, 50), Difficulty::Hard), 2100);
    }

    #[test]
    fn test_award_easy_quiz_without_bonus() {
        // 50 * 10, no bonus at 200s, no multiplier
        assert_eq!(award(&summary(50, 200), Difficulty::Easy), 500);
    }

    #[test]
    fn test_award_medium_multiplier_rounds_down() {
        // (45 * 10 + 0) * 1.5 = 675, exact
        assert_eq!(award(&summary(45, 180), Difficulty::Medium), 675);
        // (33 * 10 + 25) * 1.5 = 532.5, floored
        assert_eq!(award(&summary(33, 60), Difficulty::Medium), 532);
    }

    #[test]
    fn test_award_speed_bonus_tiers() {
        assert_eq!(award(&summary(0, 0), Difficulty::Unspecified), 50);
        assert_eq!(award(&summary(0, 59), Difficulty::Unspecified), 50);
        assert_eq!(award(&summary(0, 60), Difficulty::Unspecified), 25);
        assert_eq!(award(&summary(0, 119), Difficulty::Unspecified), 25);
        assert_eq!(award(&summary(0, 120), Difficulty::Unspecified), 10);
        assert_eq!(award(&summary(0, 179), Difficulty::Unspecified), 10);
        assert_eq!(award(&summary(0, 180), Difficulty::Unspecified), 0);
    }

    #[test]
    fn test_award_is_deterministic() {
        let s = summary(70, 90);
        assert_eq!(
            award(&s, Difficulty::Medium),
            award(&s, Difficulty::Medium)
        );
    }

    #[test]
    fn test_reconcile_updates_every_field() {
        let mut stats = UserStats::default();
        reconcile(&mut stats, &summary(80, 90), 900, "Science");

        assert_eq!(stats.total_quizzes, 1);
        assert_eq!(stats.total_score, 80);
        assert_eq!(stats.best_score, 80);
        assert_eq!(stats.points, 900);
        assert_eq!(stats.quiz_history.len(), 1);

        let entry = &stats.quiz_history[0];
        assert_eq!(entry.category, "Science");
        assert_eq!(entry.score, 80);
        assert_eq!(entry.points, 900);
    }

    #[test]
    fn test_reconcile_keeps_best_score() {
        let mut stats = UserStats::default();
        reconcile(&mut stats, &summary(90, 30), 100, "Mixed");
        reconcile(&mut stats, &summary(40, 30), 100, "Mixed");

        assert_eq!(stats.best_score, 90);
        assert_eq!(stats.total_quizzes, 2);
        assert_eq!(stats.total_score, 130);
        assert_eq!(stats.average_score(), 65);
    }

    #[test]
    fn test_reconcile_drops_oldest_history_beyond_limit() {
        let mut stats = UserStats::default();
        for i in 0..11u32 {
            reconcile(&mut stats, &summary(i, 30), i, &format!("cat {}", i));
        }

        assert_eq!(stats.quiz_history.len(), HISTORY_LIMIT);
        // The very first entry is gone, the newest is last.
        assert_eq!(stats.quiz_history[0].category, "cat 1");
        assert_eq!(stats.quiz_history[9].category, "cat 10");
        // Totals still count all eleven quizzes.
        assert_eq!(stats.total_quizzes, 11);
    }
}
