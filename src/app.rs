//! Application state and the event loop driving it.
//!
//! `App` is the only owner of mutable state at runtime: it holds the store,
//! the question provider, the active quiz session, and the form state for
//! each screen. The event loop polls the terminal on a short tick so the
//! countdown and the auto-advance fire between keystrokes; both expiries go
//! through the session's latch, which makes a late tick after a submit (or
//! a late submit after an expiry) harmless.

use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::QuizError;
use crate::auth::{self, USERNAME_MAX_LENGTH};
use crate::data::{QuestionProvider, builtin_bank};
use crate::models::{
    CATEGORIES, COUNT_CHOICES, Difficulty, HistoryEntry, QuizSettings, TIME_CHOICES, UserAccount,
};
use crate::session::{
    Advance, AnswerRecord, QuestionView, QuizSession, QuizSummary, award, reconcile,
};
use crate::store::Storage;
use crate::terminal::{self, AppTerminal};
use crate::ui;

/// Seconds a resolved question stays on screen before auto-advancing.
const AUTO_ADVANCE_SECS: u64 = 5;
/// Seconds a status message stays visible.
const STATUS_SECS: u64 = 3;
/// Poll interval for the event loop, which is also the timer resolution.
const TICK_MS: u64 = 100;
/// Users shown on the dashboard leaderboard.
const LEADERBOARD_SIZE: usize = 5;
/// History entries shown under recent activity.
const RECENT_ACTIVITY: usize = 3;
/// Character cap for email and password inputs.
const FIELD_MAX: usize = 64;

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Dashboard,
    Setup,
    Quiz,
    Results,
    Review,
}

/// Which auth form is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Signup,
}

/// Login/signup form state.
pub struct AuthForm {
    pub tab: AuthTab,
    pub username: String,
    pub email: String,
    pub password: String,
    /// Focused field, an index into [`AuthForm::field_labels`].
    pub field: usize,
    pub error: Option<String>,
}

impl AuthForm {
    fn new() -> Self {
        Self {
            tab: AuthTab::Login,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            field: 0,
            error: None,
        }
    }

    /// Labels of the active tab's fields, in focus order.
    pub fn field_labels(&self) -> &'static [&'static str] {
        match self.tab {
            AuthTab::Login => &["Username", "Password"],
            AuthTab::Signup => &["Username", "Email", "Password"],
        }
    }

    /// Value of the field at `index` on the active tab.
    pub fn field_value(&self, index: usize) -> &str {
        match (self.tab, index) {
            (_, 0) => &self.username,
            (AuthTab::Signup, 1) => &self.email,
            _ => &self.password,
        }
    }

    /// Whether the field at `index` should be masked when rendered.
    pub fn field_is_secret(&self, index: usize) -> bool {
        match self.tab {
            AuthTab::Login => index == 1,
            AuthTab::Signup => index == 2,
        }
    }

    fn active_value_mut(&mut self) -> &mut String {
        match (self.tab, self.field) {
            (_, 0) => &mut self.username,
            (AuthTab::Signup, 1) => &mut self.email,
            _ => &mut self.password,
        }
    }

    fn switch_tab(&mut self) {
        self.tab = match self.tab {
            AuthTab::Login => AuthTab::Signup,
            AuthTab::Signup => AuthTab::Login,
        };
        self.field = 0;
        self.error = None;
    }

    fn focus_next(&mut self) {
        self.field = (self.field + 1) % self.field_labels().len();
    }

    fn focus_previous(&mut self) {
        let fields = self.field_labels().len();
        self.field = (self.field + fields - 1) % fields;
    }

    fn push(&mut self, c: char) {
        let limit = if self.field == 0 {
            USERNAME_MAX_LENGTH
        } else {
            FIELD_MAX
        };
        let value = self.active_value_mut();
        if value.len() < limit {
            value.push(c);
        }
    }

    fn pop(&mut self) {
        self.active_value_mut().pop();
    }
}

const DIFFICULTY_CHOICES: &[Option<Difficulty>] = &[
    None,
    Some(Difficulty::Easy),
    Some(Difficulty::Medium),
    Some(Difficulty::Hard),
];

/// Quiz setup form state.
pub struct SetupForm {
    /// 0 selects any category, `i > 0` selects `CATEGORIES[i - 1]`.
    category: usize,
    difficulty: usize,
    count: usize,
    time: usize,
    row: usize,
}

impl SetupForm {
    /// Setting rows plus the start row.
    pub const ROWS: usize = 5;
    pub const START_ROW: usize = 4;

    fn new() -> Self {
        Self {
            category: 0,
            difficulty: 0,
            count: COUNT_CHOICES.iter().position(|&c| c == 10).unwrap_or(0),
            time: TIME_CHOICES.iter().position(|&t| t == 30).unwrap_or(0),
            row: 0,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    fn focus_next(&mut self) {
        self.row = (self.row + 1) % Self::ROWS;
    }

    fn focus_previous(&mut self) {
        self.row = (self.row + Self::ROWS - 1) % Self::ROWS;
    }

    /// Step the value on the focused row, wrapping at either end.
    fn cycle(&mut self, delta: isize) {
        let (value, len) = match self.row {
            0 => (&mut self.category, CATEGORIES.len() + 1),
            1 => (&mut self.difficulty, DIFFICULTY_CHOICES.len()),
            2 => (&mut self.count, COUNT_CHOICES.len()),
            3 => (&mut self.time, TIME_CHOICES.len()),
            _ => return,
        };
        *value = (*value as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Display label for the value on a settings row.
    pub fn value_label(&self, row: usize) -> String {
        match row {
            0 => {
                if self.category == 0 {
                    "Any Category".to_string()
                } else {
                    CATEGORIES[self.category - 1].1.to_string()
                }
            }
            1 => match DIFFICULTY_CHOICES[self.difficulty] {
                Some(difficulty) => difficulty.to_string(),
                None => "Any".to_string(),
            },
            2 => COUNT_CHOICES[self.count].to_string(),
            3 => {
                let secs = TIME_CHOICES[self.time];
                if secs == 0 {
                    "No limit".to_string()
                } else {
                    format!("{}s", secs)
                }
            }
            _ => String::new(),
        }
    }

    /// The quiz settings this form currently describes.
    pub fn settings(&self) -> QuizSettings {
        QuizSettings {
            category: (self.category > 0).then(|| CATEGORIES[self.category - 1].0.to_string()),
            difficulty: DIFFICULTY_CHOICES[self.difficulty],
            num_questions: COUNT_CHOICES[self.count],
            time_per_question: TIME_CHOICES[self.time],
        }
    }
}

/// How the current question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Correct,
    Wrong,
    TimedOut,
}

/// Feedback shown while a resolved question stays on screen.
pub struct Reveal {
    pub resolution: Resolution,
    /// Index of the chosen answer, `None` on a timeout.
    pub chosen: Option<usize>,
    advance_at: Instant,
}

/// Kind of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// A transient status message shown at the bottom of the screen.
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
    expires_at: Instant,
}

/// Entry in the points leaderboard.
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub points: u32,
    pub is_you: bool,
}

/// A quiz queued to start on the next loop iteration, after the loading
/// frame has been drawn.
struct PendingStart {
    settings: QuizSettings,
    offline: bool,
}

/// Top-level application state.
pub struct App {
    storage: Storage,
    provider: QuestionProvider,
    /// Never contact the remote API, set from the command line.
    offline_only: bool,
    screen: Screen,
    auth_form: AuthForm,
    setup_form: SetupForm,
    session: Option<QuizSession>,
    view: Option<QuestionView>,
    selected: usize,
    /// When the current question's countdown expires.
    deadline: Option<Instant>,
    reveal: Option<Reveal>,
    pending_start: Option<PendingStart>,
    summary: Option<QuizSummary>,
    last_points: u32,
    last_offline: bool,
    review_answers: Vec<AnswerRecord>,
    review_scroll: usize,
    status: Option<StatusLine>,
    should_quit: bool,
}

impl App {
    /// Open the store in `data_dir` and restore any logged-in user.
    pub fn new(data_dir: &Path, offline_only: bool) -> Result<Self, QuizError> {
        let mut storage = Storage::open(data_dir)?;

        // Refresh the cached bank so the store always carries the copy this
        // binary was built with.
        storage.cache_offline_questions(builtin_bank())?;
        let provider = QuestionProvider::new(storage.offline_questions().to_vec());

        let screen = if storage.current_user().is_some() {
            Screen::Dashboard
        } else {
            Screen::Auth
        };

        Ok(Self {
            storage,
            provider,
            offline_only,
            screen,
            auth_form: AuthForm::new(),
            setup_form: SetupForm::new(),
            session: None,
            view: None,
            selected: 0,
            deadline: None,
            reveal: None,
            pending_start: None,
            summary: None,
            last_points: 0,
            last_offline: false,
            review_answers: Vec::new(),
            review_scroll: 0,
            status: None,
            should_quit: false,
        })
    }

    /// Run the application until the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut terminal = terminal::init()?;
        let result = self.event_loop(&mut terminal).await;
        terminal::restore()?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut AppTerminal) -> Result<(), QuizError> {
        while !self.should_quit {
            self.tick();
            terminal.draw(|frame| ui::render(frame, self))?;

            // A queued quiz starts only after the loading frame is visible.
            if let Some(pending) = self.pending_start.take() {
                self.begin_session(pending).await;
                continue;
            }

            if event::poll(Duration::from_millis(TICK_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    /// Clock-driven transitions: status expiry, countdown, auto-advance.
    fn tick(&mut self) {
        if let Some(status) = &self.status {
            if Instant::now() >= status.expires_at {
                self.status = None;
            }
        }

        if self.screen != Screen::Quiz {
            return;
        }

        if self.reveal.is_none() {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.expire_current();
                }
            }
        }

        if let Some(reveal) = &self.reveal {
            if Instant::now() >= reveal.advance_at {
                self.next_question();
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match self.screen {
            Screen::Auth => self.handle_auth_key(key),
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Setup => self.handle_setup_key(key),
            Screen::Quiz => self.handle_quiz_key(key),
            Screen::Results => self.handle_results_key(key),
            Screen::Review => self.handle_review_key(key),
        }
    }

    fn handle_auth_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.auth_form.switch_tab(),
            KeyCode::Up => self.auth_form.focus_previous(),
            KeyCode::Down => self.auth_form.focus_next(),
            KeyCode::Enter => self.submit_auth(),
            KeyCode::Backspace => {
                self.auth_form.error = None;
                self.auth_form.pop();
            }
            KeyCode::Char(c) => {
                self.auth_form.error = None;
                self.auth_form.push(c);
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn submit_auth(&mut self) {
        let username = self.auth_form.username.clone();
        let password = self.auth_form.password.clone();
        match self.auth_form.tab {
            AuthTab::Login => {
                match auth::login(&mut self.storage, &username, &password) {
                    Ok(_) => {
                        self.auth_form = AuthForm::new();
                        self.screen = Screen::Dashboard;
                        self.set_status("Login successful!", StatusKind::Success);
                    }
                    Err(err) => self.auth_form.error = Some(err.to_string()),
                }
            }
            AuthTab::Signup => {
                let email = self.auth_form.email.clone();
                match auth::signup(&mut self.storage, &username, &email, &password) {
                    Ok(()) => {
                        self.auth_form = AuthForm::new();
                        self.auth_form.username = username.trim().to_string();
                        self.set_status(
                            "Account created successfully! Please login.",
                            StatusKind::Success,
                        );
                    }
                    Err(err) => self.auth_form.error = Some(err.to_string()),
                }
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Enter => {
                self.setup_form = SetupForm::new();
                self.screen = Screen::Setup;
            }
            KeyCode::Char('o') => self.queue_quiz(QuizSettings::offline(), true),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('s') => self.toggle_sound(),
            KeyCode::Char('l') => self.logout(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_setup_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.setup_form.focus_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.setup_form.focus_next(),
            KeyCode::Left | KeyCode::Char('h') => self.setup_form.cycle(-1),
            KeyCode::Right | KeyCode::Char('l') => self.setup_form.cycle(1),
            KeyCode::Enter => {
                if self.setup_form.row() == SetupForm::START_ROW {
                    self.queue_quiz(self.setup_form.settings(), false);
                } else {
                    self.setup_form.focus_next();
                }
            }
            KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.reveal.is_none() {
                    self.selected = (self.selected + 3) % 4;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.reveal.is_none() {
                    self.selected = (self.selected + 1) % 4;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.reveal.is_some() {
                    self.next_question();
                } else {
                    self.submit_selected();
                }
            }
            KeyCode::Esc => self.abandon_quiz(),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('v') | KeyCode::Enter => {
                self.review_scroll = 0;
                self.screen = Screen::Review;
            }
            KeyCode::Char('n') => {
                self.setup_form = SetupForm::new();
                self.screen = Screen::Setup;
            }
            KeyCode::Char('h') | KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_review_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let max_scroll = self.review_answers.len().saturating_sub(1);
                self.review_scroll = (self.review_scroll + 1).min(max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.review_scroll = self.review_scroll.saturating_sub(1);
            }
            KeyCode::Esc | KeyCode::Char('b') => self.screen = Screen::Results,
            KeyCode::Char('n') => {
                self.setup_form = SetupForm::new();
                self.screen = Screen::Setup;
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn queue_quiz(&mut self, settings: QuizSettings, offline: bool) {
        self.pending_start = Some(PendingStart { settings, offline });
        self.set_status("Loading quiz...", StatusKind::Info);
    }

    async fn begin_session(&mut self, pending: PendingStart) {
        let offline = pending.offline || self.offline_only;
        let questions = if offline {
            self.provider.fallback(pending.settings.num_questions)
        } else {
            self.provider.fetch(&pending.settings).await
        };

        let started = if offline {
            QuizSession::start_offline(questions, pending.settings)
        } else {
            QuizSession::start(questions, pending.settings)
        };

        match started {
            Ok(session) => {
                self.session = Some(session);
                self.summary = None;
                self.review_answers.clear();
                self.status = None;
                self.screen = Screen::Quiz;
                self.present_question();
            }
            Err(err) => {
                log::warn!("could not start quiz: {}", err);
                self.set_status(
                    "Failed to load questions. Please try again.",
                    StatusKind::Error,
                );
            }
        }
    }

    fn present_question(&mut self) {
        let Some(session) = &self.session else { return };
        let view = session
            .present_current()
            .expect("an active session has a current question");
        self.deadline = (view.time_limit > 0)
            .then(|| Instant::now() + Duration::from_secs(view.time_limit));
        self.selected = 0;
        self.reveal = None;
        self.view = Some(view);
    }

    fn submit_selected(&mut self) {
        let Some(view) = &self.view else { return };
        let Some(session) = &mut self.session else { return };
        let Some(choice) = view.choices.get(self.selected) else {
            return;
        };
        match session.submit_answer(choice) {
            Ok(correct) => {
                // Disarm the countdown before the next tick can see it.
                self.deadline = None;
                self.reveal = Some(Reveal {
                    resolution: if correct {
                        Resolution::Correct
                    } else {
                        Resolution::Wrong
                    },
                    chosen: Some(self.selected),
                    advance_at: Instant::now() + Duration::from_secs(AUTO_ADVANCE_SECS),
                });
                if correct {
                    self.set_status("Correct!", StatusKind::Success);
                } else {
                    self.set_status("Wrong answer!", StatusKind::Error);
                }
            }
            // The countdown expired on this very tick; its feedback stands.
            Err(_) => {}
        }
    }

    /// Countdown expiry for the current question.
    fn expire_current(&mut self) {
        self.deadline = None;
        let Some(session) = &mut self.session else { return };
        if let Ok(true) = session.timeout() {
            self.reveal = Some(Reveal {
                resolution: Resolution::TimedOut,
                chosen: None,
                advance_at: Instant::now() + Duration::from_secs(AUTO_ADVANCE_SECS),
            });
            self.set_status("Time's up!", StatusKind::Error);
        }
    }

    fn next_question(&mut self) {
        let Some(session) = &mut self.session else { return };
        if !session.has_answered_current() {
            return;
        }
        self.reveal = None;
        match session.advance() {
            Ok(Advance::Next(_)) => self.present_question(),
            Ok(Advance::Finished) => self.finish_quiz(),
            Err(err) => log::error!("advance failed: {}", err),
        }
    }

    /// Fold the finished session into the logged-in user's statistics and
    /// show the results screen.
    fn finish_quiz(&mut self) {
        let Some(session) = self.session.take() else { return };
        let summary = session
            .finish()
            .expect("a session that advanced past its last question is finished");
        let settings = session.settings().clone();
        let offline = session.is_offline();

        let points = award(&summary, settings.difficulty.unwrap_or_default());
        let category = settings.category_name();

        if let Some(mut account) = self.storage.current_user().cloned() {
            reconcile(&mut account.stats, &summary, points, &category);
            let saved = self
                .storage
                .put_user(account.clone())
                .and_then(|_| self.storage.set_current_user(Some(account)));
            if let Err(err) = saved {
                log::error!("failed to persist quiz results: {}", err);
                self.set_status("Could not save your results", StatusKind::Error);
            }
        }

        self.summary = Some(summary);
        self.last_points = points;
        self.last_offline = offline;
        self.review_answers = session.into_answers();
        self.review_scroll = 0;
        self.view = None;
        self.deadline = None;
        self.reveal = None;
        self.screen = Screen::Results;
    }

    /// Drop an unfinished session and return to the dashboard.
    fn abandon_quiz(&mut self) {
        self.session = None;
        self.view = None;
        self.deadline = None;
        self.reveal = None;
        self.screen = Screen::Dashboard;
        self.set_status("Quiz abandoned", StatusKind::Info);
    }

    fn logout(&mut self) {
        if let Err(err) = auth::logout(&mut self.storage) {
            self.set_status(&err.to_string(), StatusKind::Error);
            return;
        }
        self.auth_form = AuthForm::new();
        self.screen = Screen::Auth;
        self.set_status("Logged out", StatusKind::Info);
    }

    fn toggle_theme(&mut self) {
        let next = if self.storage.theme() == "dark" {
            "light"
        } else {
            "dark"
        };
        match self.storage.set_theme(next) {
            Ok(()) => self.set_status(&format!("Theme: {}", next), StatusKind::Info),
            Err(err) => self.set_status(&err.to_string(), StatusKind::Error),
        }
    }

    fn toggle_sound(&mut self) {
        let next = !self.storage.sound_enabled();
        match self.storage.set_sound_enabled(next) {
            Ok(()) => {
                let label = if next { "Sound: on" } else { "Sound: off" };
                self.set_status(label, StatusKind::Info);
            }
            Err(err) => self.set_status(&err.to_string(), StatusKind::Error),
        }
    }

    fn set_status(&mut self, text: &str, kind: StatusKind) {
        self.status = Some(StatusLine {
            text: text.to_string(),
            kind,
            expires_at: Instant::now() + Duration::from_secs(STATUS_SECS),
        });
    }

    // Accessors for rendering.

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn auth_form(&self) -> &AuthForm {
        &self.auth_form
    }

    pub fn setup_form(&self) -> &SetupForm {
        &self.setup_form
    }

    pub fn current_view(&self) -> Option<&QuestionView> {
        self.view.as_ref()
    }

    pub fn selected_choice(&self) -> usize {
        self.selected
    }

    pub fn reveal(&self) -> Option<&Reveal> {
        self.reveal.as_ref()
    }

    /// Seconds left on the countdown, `None` when the question is untimed.
    pub fn remaining_seconds(&self) -> Option<u64> {
        let deadline = self.deadline?;
        let millis = deadline
            .saturating_duration_since(Instant::now())
            .as_millis() as u64;
        Some(millis.div_ceil(1000))
    }

    /// Seconds until a resolved question auto-advances.
    pub fn auto_advance_seconds(&self) -> Option<u64> {
        let reveal = self.reveal.as_ref()?;
        let millis = reveal
            .advance_at
            .saturating_duration_since(Instant::now())
            .as_millis() as u64;
        Some(millis.div_ceil(1000))
    }

    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    pub fn last_points(&self) -> u32 {
        self.last_points
    }

    pub fn last_offline(&self) -> bool {
        self.last_offline
    }

    pub fn review_answers(&self) -> &[AnswerRecord] {
        &self.review_answers
    }

    pub fn review_scroll(&self) -> usize {
        self.review_scroll
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_start.is_some()
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.storage.current_user()
    }

    pub fn theme(&self) -> &str {
        self.storage.theme()
    }

    pub fn sound_enabled(&self) -> bool {
        self.storage.sound_enabled()
    }

    /// Top accounts by points. The logged-in user is flagged.
    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        let me = self.storage.current_user().map(|a| a.username.clone());
        let mut users = self.storage.list_users();
        users.sort_by(|a, b| {
            b.stats
                .points
                .cmp(&a.stats.points)
                .then_with(|| a.username.cmp(&b.username))
        });
        users
            .iter()
            .take(LEADERBOARD_SIZE)
            .enumerate()
            .map(|(i, user)| LeaderboardRow {
                rank: i + 1,
                username: user.username.clone(),
                points: user.stats.points,
                is_you: me.as_deref() == Some(user.username.as_str()),
            })
            .collect()
    }

    /// The logged-in user's latest quizzes, newest first.
    pub fn recent_activity(&self) -> Vec<&HistoryEntry> {
        match self.storage.current_user() {
            Some(account) => account
                .stats
                .quiz_history
                .iter()
                .rev()
                .take(RECENT_ACTIVITY)
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_app(tag: &str) -> (App, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "trivia-quiz-app-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        let app = App::new(&dir, true).unwrap();
        (app, dir)
    }

    fn login_test_user(app: &mut App) {
        auth::signup(&mut app.storage, "tester", "t@example.com", "pw").unwrap();
        auth::login(&mut app.storage, "tester", "pw").unwrap();
        app.screen = Screen::Dashboard;
    }

    fn start_fixed_quiz(app: &mut App, num_questions: usize) {
        let questions = app.provider.fallback(num_questions);
        let session = QuizSession::start_offline(questions, QuizSettings::offline()).unwrap();
        app.session = Some(session);
        app.screen = Screen::Quiz;
        app.present_question();
    }

    fn submit_correct(app: &mut App) {
        let view = app.current_view().unwrap();
        let correct = view
            .choices
            .iter()
            .position(|c| *c == view.question.correct)
            .unwrap();
        app.selected = correct;
        app.submit_selected();
    }

    #[test]
    fn test_new_app_lands_on_auth_screen() {
        let (app, dir) = scratch_app("fresh");
        assert_eq!(app.screen(), Screen::Auth);
        assert!(app.current_user().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_full_quiz_reconciles_stats() {
        let (mut app, dir) = scratch_app("full-quiz");
        login_test_user(&mut app);
        start_fixed_quiz(&mut app, 2);

        for _ in 0..2 {
            submit_correct(&mut app);
            assert!(app.reveal().is_some());
            app.next_question();
        }

        assert_eq!(app.screen(), Screen::Results);
        let summary = app.summary().unwrap();
        assert_eq!(summary.percentage, 100);
        assert_eq!(summary.score, 2);
        // 100% of a sub-minute untimed-difficulty quiz: 1000 + 50 bonus.
        assert_eq!(app.last_points(), 1050);
        assert!(app.last_offline());

        let stored = app.storage.get_user("tester").unwrap();
        assert_eq!(stored.stats.total_quizzes, 1);
        assert_eq!(stored.stats.best_score, 100);
        assert_eq!(stored.stats.points, 1050);
        assert_eq!(stored.stats.quiz_history.len(), 1);
        assert_eq!(stored.stats.quiz_history[0].category, "Mixed");

        // The logged-in snapshot was refreshed too.
        assert_eq!(app.current_user().unwrap().stats.points, 1050);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_quiz_without_login_keeps_no_stats() {
        let (mut app, dir) = scratch_app("anonymous");
        start_fixed_quiz(&mut app, 1);
        submit_correct(&mut app);
        app.next_question();

        assert_eq!(app.screen(), Screen::Results);
        assert!(app.summary().is_some());
        assert!(app.storage.list_users().is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_expiry_then_submit_keeps_the_timeout() {
        let (mut app, dir) = scratch_app("expiry-race");
        start_fixed_quiz(&mut app, 1);

        app.expire_current();
        assert!(matches!(
            app.reveal().map(|r| r.resolution),
            Some(Resolution::TimedOut)
        ));

        // A submit landing after the expiry must not change the record.
        app.submit_selected();
        assert!(matches!(
            app.reveal().map(|r| r.resolution),
            Some(Resolution::TimedOut)
        ));

        app.next_question();
        assert_eq!(app.review_answers().len(), 1);
        assert_eq!(app.review_answers()[0].user_answer, None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_second_expiry_after_submit_is_ignored() {
        let (mut app, dir) = scratch_app("submit-race");
        start_fixed_quiz(&mut app, 1);

        submit_correct(&mut app);
        let resolution = app.reveal().map(|r| r.resolution);
        app.expire_current();
        assert_eq!(app.reveal().map(|r| r.resolution), resolution);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_abandon_discards_session() {
        let (mut app, dir) = scratch_app("abandon");
        login_test_user(&mut app);
        start_fixed_quiz(&mut app, 3);
        submit_correct(&mut app);

        app.abandon_quiz();
        assert_eq!(app.screen(), Screen::Dashboard);
        assert!(app.session.is_none());
        assert!(app.current_view().is_none());
        // Nothing was reconciled for the abandoned quiz.
        assert_eq!(app.storage.get_user("tester").unwrap().stats.total_quizzes, 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_setup_form_defaults_and_cycling() {
        let mut form = SetupForm::new();
        let settings = form.settings();
        assert_eq!(settings.category, None);
        assert_eq!(settings.difficulty, None);
        assert_eq!(settings.num_questions, 10);
        assert_eq!(settings.time_per_question, 30);

        // Cycling left from "any category" wraps to the last category.
        form.cycle(-1);
        let settings = form.settings();
        assert_eq!(
            settings.category.as_deref(),
            Some(CATEGORIES[CATEGORIES.len() - 1].0)
        );

        form.row = 1;
        form.cycle(1);
        assert_eq!(form.settings().difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn test_leaderboard_ranks_by_points() {
        let (mut app, dir) = scratch_app("leaderboard");
        for (name, points) in [("ana", 300u32), ("ben", 900), ("cat", 600)] {
            let mut account = UserAccount::new(name, "x@example.com", "pw");
            account.stats.points = points;
            app.storage.put_user(account).unwrap();
        }
        auth::login(&mut app.storage, "cat", "pw").unwrap();

        let rows = app.leaderboard();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].username, "ben");
        assert_eq!(rows[0].rank, 1);
        assert!(!rows[0].is_you);
        assert_eq!(rows[1].username, "cat");
        assert!(rows[1].is_you);
        assert_eq!(rows[2].username, "ana");
        let _ = fs::remove_dir_all(&dir);
    }
}
