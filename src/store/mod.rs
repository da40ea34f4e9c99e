//! Persistent application state.
//!
//! Everything remembered between runs lives in one JSON document: the
//! account map, the logged-in user snapshot, the cached offline bank, and
//! presentation preferences. The document is read whole at startup and
//! rewritten whole after every mutation; account updates are a
//! read-modify-write of the full record, never a field-level patch.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{Question, UserAccount};

const STATE_FILE: &str = "state.json";

/// Persistence failure.
#[derive(Debug)]
pub enum StoreError {
    /// The document or its directory could not be read or written.
    Io(io::Error),
    /// The document could not be serialized.
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "state file error: {}", err),
            StoreError::Serialize(err) => write!(f, "state serialization error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err)
    }
}

/// The whole on-disk document.
#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    users: HashMap<String, UserAccount>,
    /// Snapshot of the logged-in account, `None` when logged out.
    #[serde(default)]
    current_user: Option<UserAccount>,
    #[serde(default)]
    offline_questions: Vec<Question>,
    #[serde(default = "default_theme")]
    theme: String,
    #[serde(default = "default_sound")]
    sound_enabled: bool,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_sound() -> bool {
    true
}

impl Default for StateDocument {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            current_user: None,
            offline_questions: Vec::new(),
            theme: default_theme(),
            sound_enabled: default_sound(),
        }
    }
}

/// Owner of the state document.
pub struct Storage {
    path: PathBuf,
    state: StateDocument,
}

impl Storage {
    /// Open the state document in `dir`, creating the directory if needed.
    ///
    /// A missing or unreadable document starts fresh with the defaults.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(STATE_FILE);
        let state = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                log::warn!("state file unreadable, starting fresh: {}", err);
                StateDocument::default()
            }),
            Err(_) => StateDocument::default(),
        };
        Ok(Self { path, state })
    }

    /// Write the whole document back to disk.
    ///
    /// Writes to a sibling temp file first so the document is replaced in
    /// one rename and never observed half-written.
    fn save(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Look up an account by username.
    pub fn get_user(&self, username: &str) -> Option<&UserAccount> {
        self.state.users.get(username)
    }

    /// Insert or overwrite an account record and persist.
    pub fn put_user(&mut self, account: UserAccount) -> Result<(), StoreError> {
        self.state
            .users
            .insert(account.username.clone(), account);
        self.save()
    }

    /// Every stored account, in no particular order.
    pub fn list_users(&self) -> Vec<&UserAccount> {
        self.state.users.values().collect()
    }

    /// The logged-in account snapshot, if any.
    pub fn current_user(&self) -> Option<&UserAccount> {
        self.state.current_user.as_ref()
    }

    /// Replace the logged-in snapshot and persist.
    pub fn set_current_user(&mut self, account: Option<UserAccount>) -> Result<(), StoreError> {
        self.state.current_user = account;
        self.save()
    }

    /// The cached offline bank.
    pub fn offline_questions(&self) -> &[Question] {
        &self.state.offline_questions
    }

    /// Replace the cached offline bank and persist.
    pub fn cache_offline_questions(&mut self, questions: Vec<Question>) -> Result<(), StoreError> {
        self.state.offline_questions = questions;
        self.save()
    }

    pub fn theme(&self) -> &str {
        &self.state.theme
    }

    pub fn set_theme(&mut self, theme: &str) -> Result<(), StoreError> {
        self.state.theme = theme.to_string();
        self.save()
    }

    pub fn sound_enabled(&self) -> bool {
        self.state.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.state.sound_enabled = enabled;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "trivia-quiz-store-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_open_starts_empty() {
        let dir = scratch_dir("empty");
        let storage = Storage::open(&dir).unwrap();
        assert!(storage.list_users().is_empty());
        assert!(storage.current_user().is_none());
        assert!(storage.offline_questions().is_empty());
        assert_eq!(storage.theme(), "light");
        assert!(storage.sound_enabled());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_accounts_survive_reopen() {
        let dir = scratch_dir("reopen");
        {
            let mut storage = Storage::open(&dir).unwrap();
            storage
                .put_user(UserAccount::new("alice", "a@example.com", "pw"))
                .unwrap();
            storage.set_theme("dark").unwrap();
        }
        let storage = Storage::open(&dir).unwrap();
        assert!(storage.get_user("alice").is_some());
        assert!(storage.get_user("bob").is_none());
        assert_eq!(storage.theme(), "dark");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_put_user_overwrites_whole_record() {
        let dir = scratch_dir("overwrite");
        let mut storage = Storage::open(&dir).unwrap();

        let mut account = UserAccount::new("carol", "c@example.com", "pw");
        storage.put_user(account.clone()).unwrap();

        account.stats.points = 500;
        account.stats.total_quizzes = 1;
        storage.put_user(account).unwrap();

        let stored = storage.get_user("carol").unwrap();
        assert_eq!(stored.stats.points, 500);
        assert_eq!(stored.stats.total_quizzes, 1);
        assert_eq!(storage.list_users().len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_current_user_snapshot_roundtrip() {
        let dir = scratch_dir("current");
        {
            let mut storage = Storage::open(&dir).unwrap();
            let account = UserAccount::new("dave", "d@example.com", "pw");
            storage.put_user(account.clone()).unwrap();
            storage.set_current_user(Some(account)).unwrap();
        }
        {
            let storage = Storage::open(&dir).unwrap();
            assert_eq!(
                storage.current_user().map(|a| a.username.as_str()),
                Some("dave")
            );
        }
        {
            let mut storage = Storage::open(&dir).unwrap();
            storage.set_current_user(None).unwrap();
        }
        let storage = Storage::open(&dir).unwrap();
        assert!(storage.current_user().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_document_starts_fresh() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(STATE_FILE), "{not json at all").unwrap();

        let storage = Storage::open(&dir).unwrap();
        assert!(storage.list_users().is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_offline_cache_roundtrip() {
        let dir = scratch_dir("cache");
        {
            let mut storage = Storage::open(&dir).unwrap();
            storage
                .cache_offline_questions(crate::data::builtin_bank())
                .unwrap();
        }
        let storage = Storage::open(&dir).unwrap();
        assert_eq!(storage.offline_questions().len(), 43);
        let _ = fs::remove_dir_all(&dir);
    }
}
