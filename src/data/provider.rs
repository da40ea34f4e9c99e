//! Question sourcing from the Open Trivia DB, with the bundled bank as a
//! fallback.
//!
//! The provider promises its caller a question list: any transport problem
//! (no network, timeout, malformed body, non-success response code) is
//! logged and silently answered from the offline bank instead.

use std::fmt;
use std::time::Duration;

use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::models::{Difficulty, Question, QuizSettings};

const API_URL: &str = "https://opentdb.com/api.php";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a remote fetch failed. Never surfaces past the provider.
#[derive(Debug)]
pub enum FetchError {
    /// Request or body failure: connect error, timeout, malformed JSON.
    Transport(reqwest::Error),
    /// The API answered with a non-success response code.
    ResponseCode(u8),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(err) => write!(f, "transport error: {}", err),
            FetchError::ResponseCode(code) => write!(f, "api response code {}", code),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

/// Response envelope of the trivia API.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

/// One question as the API serializes it.
#[derive(Debug, Deserialize)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: [String; 3],
    category: String,
    #[serde(default)]
    difficulty: Difficulty,
}

impl ApiQuestion {
    fn into_question(self) -> Question {
        Question {
            question: decode_entities(&self.question),
            correct: decode_entities(&self.correct_answer),
            incorrect: self.incorrect_answers.map(|a| decode_entities(&a)),
            category: decode_entities(&self.category),
            difficulty: self.difficulty,
        }
    }
}

/// Fetches questions for a quiz.
pub struct QuestionProvider {
    client: reqwest::Client,
    bank: Vec<Question>,
}

impl QuestionProvider {
    pub fn new(bank: Vec<Question>) -> Self {
        Self {
            client: reqwest::Client::new(),
            bank,
        }
    }

    /// Questions matching the given settings.
    ///
    /// Tries the remote API first and falls back to the offline bank on any
    /// failure; callers get a list either way and cannot tell which path
    /// served it.
    pub async fn fetch(&self, settings: &QuizSettings) -> Vec<Question> {
        match self.fetch_remote(settings).await {
            Ok(questions) => questions,
            Err(err) => {
                log::warn!("remote fetch failed, serving offline bank: {}", err);
                self.fallback(settings.num_questions)
            }
        }
    }

    async fn fetch_remote(&self, settings: &QuizSettings) -> Result<Vec<Question>, FetchError> {
        let url = request_url(settings);
        log::debug!("fetching {}", url);

        let response = self.client.get(&url).timeout(FETCH_TIMEOUT).send().await?;
        let payload: ApiResponse = response.json().await?;

        if payload.response_code != 0 {
            return Err(FetchError::ResponseCode(payload.response_code));
        }

        Ok(payload
            .results
            .into_iter()
            .map(ApiQuestion::into_question)
            .collect())
    }

    /// A random selection from the offline bank, each question at most once.
    ///
    /// Asking for more than the bank holds returns the whole bank shuffled.
    pub fn fallback(&self, count: usize) -> Vec<Question> {
        let mut questions = self.bank.clone();
        questions.shuffle(&mut rand::thread_rng());
        questions.truncate(count);
        questions
    }
}

fn request_url(settings: &QuizSettings) -> String {
    let mut url = format!("{}?amount={}&type=multiple", API_URL, settings.num_questions);
    if let Some(category) = &settings.category {
        url.push_str("&category=");
        url.push_str(category);
    }
    if let Some(param) = settings.difficulty.and_then(Difficulty::api_param) {
        url.push_str("&difficulty=");
        url.push_str(param);
    }
    url
}

/// Longest entity body worth scanning for, e.g. `#x1F600`.
const MAX_ENTITY_LEN: usize = 12;

/// Decode the HTML entities the trivia API embeds in its text fields.
///
/// Covers the named entities the API emits in practice plus decimal
/// (`&#233;`) and hexadecimal (`&#x27;`) character references. Anything
/// unrecognized is left in place.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match rest[1..].find(';').map(|i| i + 1) {
            Some(semi) if semi <= MAX_ENTITY_LEN => match decode_entity(&rest[1..semi]) {
                Some(decoded) => {
                    out.push(decoded);
                    rest = &rest[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            },
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = body.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    let decoded = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "shy" => '\u{ad}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "deg" => '°',
        "eacute" => 'é',
        "aacute" => 'á',
        "iacute" => 'í',
        "oacute" => 'ó',
        "ntilde" => 'ñ',
        "uuml" => 'ü',
        "ouml" => 'ö',
        "auml" => 'ä',
        "pi" => 'π',
        "sup2" => '²',
        "sup3" => '³',
        "frac12" => '½',
        _ => return None,
    };
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(
            decode_entities("Rock &amp; Roll &quot;Hits&quot;"),
            "Rock & Roll \"Hits\""
        );
        assert_eq!(decode_entities("It&rsquo;s &gt; 5"), "It\u{2019}s > 5");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("Pok&#233;mon"), "Pokémon");
        assert_eq!(decode_entities("don&#x27;t"), "don't");
        assert_eq!(decode_entities("caf&#xE9;"), "café");
    }

    #[test]
    fn test_decode_leaves_unknown_text_alone() {
        assert_eq!(decode_entities("no entities here"), "no entities here");
        assert_eq!(decode_entities("&unknownentity;"), "&unknownentity;");
        assert_eq!(decode_entities("AT&T problems"), "AT&T problems");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }

    #[test]
    fn test_decode_is_single_pass() {
        // A decoded '&' must not combine with following text.
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_api_payload_maps_to_questions() {
        let raw = r#"{
            "response_code": 0,
            "results": [
                {
                    "category": "Science &amp; Nature",
                    "type": "multiple",
                    "difficulty": "medium",
                    "question": "What is H&#50;O?",
                    "correct_answer": "Water",
                    "incorrect_answers": ["Hydrogen", "Oxygen", "Helium"]
                }
            ]
        }"#;
        let payload: ApiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.response_code, 0);

        let questions: Vec<Question> = payload
            .results
            .into_iter()
            .map(ApiQuestion::into_question)
            .collect();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].category, "Science & Nature");
        assert_eq!(questions[0].question, "What is H2O?");
        assert_eq!(questions[0].correct, "Water");
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_unknown_difficulty_becomes_unspecified() {
        let raw = r#"{
            "question": "Q?",
            "correct_answer": "A",
            "incorrect_answers": ["B", "C", "D"],
            "category": "Misc",
            "difficulty": "impossible"
        }"#;
        let question: ApiQuestion = serde_json::from_str(raw).unwrap();
        assert_eq!(question.difficulty, Difficulty::Unspecified);
    }

    #[test]
    fn test_request_url_includes_only_set_filters() {
        let mut settings = QuizSettings::default();
        settings.num_questions = 15;
        assert_eq!(
            request_url(&settings),
            "https://opentdb.com/api.php?amount=15&type=multiple"
        );

        settings.category = Some("22".to_string());
        settings.difficulty = Some(Difficulty::Hard);
        assert_eq!(
            request_url(&settings),
            "https://opentdb.com/api.php?amount=15&type=multiple&category=22&difficulty=hard"
        );
    }

    #[test]
    fn test_fallback_never_repeats_questions() {
        let provider = QuestionProvider::new(crate::data::builtin_bank());
        let selection = provider.fallback(10);
        assert_eq!(selection.len(), 10);

        let mut texts: Vec<&str> = selection.iter().map(|q| q.question.as_str()).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), 10);
    }

    #[test]
    fn test_fallback_caps_at_bank_size() {
        let bank = crate::data::builtin_bank();
        let bank_size = bank.len();
        let provider = QuestionProvider::new(bank);
        assert_eq!(provider.fallback(1000).len(), bank_size);
        assert_eq!(provider.fallback(0).len(), 0);
    }
}
