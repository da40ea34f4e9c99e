use crate::models::Question;

const BANK_JSON: &str = include_str!("bank.json");

/// The offline question bank compiled into the binary.
pub fn builtin_bank() -> Vec<Question> {
    let questions: Vec<Question> =
        serde_json::from_str(BANK_JSON).expect("bundled bank.json must parse");

    if questions.is_empty() {
        panic!("bundled bank.json must contain at least one question");
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn test_builtin_bank_parses() {
        let bank = builtin_bank();
        assert_eq!(bank.len(), 43);
    }

    #[test]
    fn test_builtin_bank_covers_all_difficulties() {
        let bank = builtin_bank();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert!(
                bank.iter().any(|q| q.difficulty == difficulty),
                "no {} questions in the bank",
                difficulty
            );
        }
        assert!(bank.iter().all(|q| !q.category.is_empty()));
        assert!(bank.iter().all(|q| !q.correct.is_empty()));
    }
}
