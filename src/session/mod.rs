//! Quiz session lifecycle.
//!
//! A [`QuizSession`] owns one attempt at a quiz: the question list, the
//! settings it was started with, and the answers recorded so far. The
//! presentation layer drives it through discrete transitions (submit,
//! timeout, advance) and reads a summary once every question is resolved.
//! Nothing here touches the terminal, the clock deadline, or the store.

mod scoring;

use std::fmt;
use std::time::Instant;

use rand::seq::SliceRandom;

use crate::models::{Question, QuizSettings};

pub use scoring::{HISTORY_LIMIT, award, reconcile};

/// A transition was invoked out of contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A quiz cannot start with zero questions.
    EmptyQuestionSet,
    /// The session has no question at the current index.
    SessionNotActive,
    /// The current question already has an answer recorded.
    AlreadyAnswered,
    /// The current question has no answer recorded yet.
    NotAnswered,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyQuestionSet => write!(f, "no questions to start a quiz with"),
            SessionError::SessionNotActive => write!(f, "no active question"),
            SessionError::AlreadyAnswered => write!(f, "current question is already answered"),
            SessionError::NotAnswered => write!(f, "current question is not answered yet"),
        }
    }
}

impl std::error::Error for SessionError {}

/// What happened on a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question: String,
    /// `None` when the countdown expired before a choice was made.
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// The current question prepared for display.
#[derive(Debug, Clone)]
pub struct QuestionView {
    /// 0-based index of the question.
    pub index: usize,
    pub total: usize,
    pub question: Question,
    /// All four answers in a fresh random order.
    pub choices: Vec<String>,
    /// Seconds allowed for this question. Zero means no countdown.
    pub time_limit: u64,
}

/// Result of advancing past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another question is waiting at this index.
    Next(usize),
    /// Every question has been resolved.
    Finished,
}

/// Immutable outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub total_questions: usize,
    /// Number of correct answers.
    pub score: usize,
    /// Correct answers as a rounded percentage.
    pub percentage: u32,
    /// Wall-clock seconds from start to the final advance.
    pub elapsed_seconds: u64,
}

/// One run through a quiz.
///
/// The answer list acts as a latch: a question at the current index is
/// resolved exactly once, whether by a submitted choice or by a countdown
/// expiry, and `answers.len() == current` holds again after every advance.
pub struct QuizSession {
    questions: Vec<Question>,
    settings: QuizSettings,
    answers: Vec<AnswerRecord>,
    current: usize,
    score: usize,
    started_at: Instant,
    /// Elapsed time captured once, on the advance that finishes the session.
    finished_after: Option<u64>,
    offline: bool,
}

impl QuizSession {
    /// Start a quiz over the given questions.
    pub fn start(questions: Vec<Question>, settings: QuizSettings) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }
        Ok(Self {
            answers: Vec::with_capacity(questions.len()),
            current: 0,
            score: 0,
            started_at: Instant::now(),
            finished_after: None,
            offline: false,
            questions,
            settings,
        })
    }

    /// Start a quiz that was explicitly requested from the bundled bank.
    pub fn start_offline(
        questions: Vec<Question>,
        settings: QuizSettings,
    ) -> Result<Self, SessionError> {
        let mut session = Self::start(questions, settings)?;
        session.offline = true;
        Ok(session)
    }

    /// The current question with its choices shuffled for display.
    ///
    /// The shuffle is fresh on every call and never recorded anywhere.
    pub fn present_current(&self) -> Result<QuestionView, SessionError> {
        let question = self
            .questions
            .get(self.current)
            .ok_or(SessionError::SessionNotActive)?;
        let mut choices = Vec::with_capacity(4);
        choices.push(question.correct.clone());
        choices.extend(question.incorrect.iter().cloned());
        choices.shuffle(&mut rand::thread_rng());
        Ok(QuestionView {
            index: self.current,
            total: self.questions.len(),
            question: question.clone(),
            choices,
            time_limit: self.settings.time_per_question,
        })
    }

    /// Record the user's choice for the current question.
    ///
    /// Returns whether the choice was correct. Fails with `AlreadyAnswered`
    /// when the question is resolved, including by an earlier timeout.
    pub fn submit_answer(&mut self, choice: &str) -> Result<bool, SessionError> {
        let question = self
            .questions
            .get(self.current)
            .ok_or(SessionError::SessionNotActive)?;
        if self.answers.len() > self.current {
            return Err(SessionError::AlreadyAnswered);
        }
        let is_correct = choice == question.correct;
        self.answers.push(AnswerRecord {
            question: question.question.clone(),
            user_answer: Some(choice.to_string()),
            correct_answer: question.correct.clone(),
            is_correct,
        });
        if is_correct {
            self.score += 1;
        }
        Ok(is_correct)
    }

    /// Record a countdown expiry for the current question.
    ///
    /// Returns `false` without recording anything when the question was
    /// already answered: whichever of submit and expiry lands first wins.
    pub fn timeout(&mut self) -> Result<bool, SessionError> {
        let question = self
            .questions
            .get(self.current)
            .ok_or(SessionError::SessionNotActive)?;
        if self.answers.len() > self.current {
            return Ok(false);
        }
        self.answers.push(AnswerRecord {
            question: question.question.clone(),
            user_answer: None,
            correct_answer: question.correct.clone(),
            is_correct: false,
        });
        Ok(true)
    }

    /// Move past the current question once it has an answer recorded.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if self.current >= self.questions.len() {
            return Err(SessionError::SessionNotActive);
        }
        if self.answers.len() <= self.current {
            return Err(SessionError::NotAnswered);
        }
        self.current += 1;
        if self.current == self.questions.len() {
            self.finished_after = Some(self.started_at.elapsed().as_secs());
            Ok(Advance::Finished)
        } else {
            Ok(Advance::Next(self.current))
        }
    }

    /// Summary of a finished session. Stable across repeated calls.
    pub fn finish(&self) -> Result<QuizSummary, SessionError> {
        let elapsed_seconds = self.finished_after.ok_or(SessionError::SessionNotActive)?;
        let total = self.questions.len();
        let percentage = ((self.score as f64 / total as f64) * 100.0).round() as u32;
        Ok(QuizSummary {
            total_questions: total,
            score: self.score,
            percentage,
            elapsed_seconds,
        })
    }

    /// Whether the current question already has an answer recorded.
    pub fn has_answered_current(&self) -> bool {
        self.answers.len() > self.current
    }

    /// Whether every question has been resolved and advanced past.
    pub fn is_finished(&self) -> bool {
        self.finished_after.is_some()
    }

    /// Whether this session was explicitly started from the bundled bank.
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Consume the session, keeping only the per-question records.
    pub fn into_answers(self) -> Vec<AnswerRecord> {
        self.answers
    }
}
