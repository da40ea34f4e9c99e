//! Account management: signup, login, logout.
//!
//! Accounts live in the local state document and passwords are stored and
//! compared as plain text. Signing up does not log the new account in; the
//! user logs in explicitly afterwards.

use std::fmt;

use crate::models::UserAccount;
use crate::store::{Storage, StoreError};

/// Username validation constants.
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 16;

/// Why an auth operation failed.
#[derive(Debug)]
pub enum AuthError {
    /// Login username/password pair does not match a stored account.
    InvalidCredentials,
    /// Signup username is already taken.
    DuplicateAccount,
    /// Signup username failed validation.
    InvalidUsername(&'static str),
    /// The state document could not be persisted.
    Store(StoreError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "invalid username or password"),
            AuthError::DuplicateAccount => write!(f, "username already exists"),
            AuthError::InvalidUsername(reason) => write!(f, "{}", reason),
            AuthError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Store(err)
    }
}

/// Validates a username according to the rules.
///
/// Returns `Ok(())` if valid, or `Err` with an error message.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let trimmed = username.trim();

    if trimmed.len() < USERNAME_MIN_LENGTH {
        return Err("Username must be at least 3 characters");
    }

    if trimmed.len() > USERNAME_MAX_LENGTH {
        return Err("Username must be at most 16 characters");
    }

    Ok(())
}

/// Create an account with zeroed statistics.
pub fn signup(
    storage: &mut Storage,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), AuthError> {
    let username = username.trim();
    validate_username(username).map_err(AuthError::InvalidUsername)?;

    if storage.get_user(username).is_some() {
        return Err(AuthError::DuplicateAccount);
    }

    storage.put_user(UserAccount::new(username, email.trim(), password))?;
    Ok(())
}

/// Check credentials and snapshot the account as the logged-in user.
pub fn login(
    storage: &mut Storage,
    username: &str,
    password: &str,
) -> Result<UserAccount, AuthError> {
    let account = storage
        .get_user(username.trim())
        .filter(|account| account.password == password)
        .cloned()
        .ok_or(AuthError::InvalidCredentials)?;

    storage.set_current_user(Some(account.clone()))?;
    Ok(account)
}

/// Clear the logged-in snapshot.
pub fn logout(storage: &mut Storage) -> Result<(), AuthError> {
    storage.set_current_user(None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_storage(tag: &str) -> (Storage, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "trivia-quiz-auth-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        (Storage::open(&dir).unwrap(), dir)
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("abcdefghijklmnop").is_ok()); // 16 chars
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abcdefghijklmnopq").is_err()); // 17 chars
        assert!(validate_username("  ab  ").is_err()); // trimmed = 2 chars
    }

    #[test]
    fn test_signup_then_login() {
        let (mut storage, dir) = scratch_storage("signup-login");
        signup(&mut storage, "alice", "alice@example.com", "hunter2").unwrap();

        // Signup alone must not log anyone in.
        assert!(storage.current_user().is_none());

        let account = login(&mut storage, "alice", "hunter2").unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(
            storage.current_user().map(|a| a.username.as_str()),
            Some("alice")
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_signup_rejects_taken_username() {
        let (mut storage, dir) = scratch_storage("duplicate");
        signup(&mut storage, "bob", "bob@example.com", "pw").unwrap();
        assert!(matches!(
            signup(&mut storage, "bob", "other@example.com", "pw2"),
            Err(AuthError::DuplicateAccount)
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_signup_rejects_short_username() {
        let (mut storage, dir) = scratch_storage("short");
        assert!(matches!(
            signup(&mut storage, "ab", "ab@example.com", "pw"),
            Err(AuthError::InvalidUsername(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let (mut storage, dir) = scratch_storage("badcreds");
        signup(&mut storage, "carol", "c@example.com", "right").unwrap();

        assert!(matches!(
            login(&mut storage, "carol", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&mut storage, "nobody", "right"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(storage.current_user().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_logout_clears_snapshot() {
        let (mut storage, dir) = scratch_storage("logout");
        signup(&mut storage, "dave", "d@example.com", "pw").unwrap();
        login(&mut storage, "dave", "pw").unwrap();

        logout(&mut storage).unwrap();
        assert!(storage.current_user().is_none());
        // The account itself is untouched.
        assert!(storage.get_user("dave").is_some());
        let _ = fs::remove_dir_all(&dir);
    }
}
