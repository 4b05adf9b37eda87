//! Registered users.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, PoisonError};

use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{read_optional, write_json, StoreError};

/// File name of the user store inside the data directory.
pub const USERS_FILE: &str = "users.json";

pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

const PASSWORD_KEY_CONTEXT: &str = "photomark user password v1";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("email pattern compiles")
});

/// Registration and login failures, worded for display.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    password_hash: String,
}

impl User {
    fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(username, password).to_hex().to_string(),
        }
    }

    fn password_matches(&self, password: &str) -> bool {
        blake3::Hash::from_hex(&self.password_hash)
            .map(|stored| stored == hash_password(&self.username, password))
            .unwrap_or(false)
    }
}

/// BLAKE3 keyed by a per-username key, so equal passwords differ across users.
fn hash_password(username: &str, password: &str) -> blake3::Hash {
    let key = blake3::derive_key(PASSWORD_KEY_CONTEXT, username.as_bytes());
    blake3::keyed_hash(&key, password.as_bytes())
}

/// JSON-file backed user registry.
#[derive(Debug)]
pub struct UserRepository {
    path: PathBuf,
    min_password_len: usize,
    lock: Mutex<()>,
}

impl UserRepository {
    /// Open the store at `path`. The file is created on first registration.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
            lock: Mutex::new(()),
        }
    }

    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a new user after validating the form fields.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<(), AuthError> {
        if username.trim().is_empty() || email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }
        if password.chars().count() < self.min_password_len {
            return Err(AuthError::PasswordTooShort(self.min_password_len));
        }
        if !EMAIL_PATTERN.is_match(email) {
            return Err(AuthError::InvalidEmail);
        }

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut users = self.load()?;

        if users.iter().any(|u| u.username == username) {
            return Err(AuthError::UsernameTaken);
        }
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken);
        }

        users.push(User::new(username, email, password));
        write_json(&self.path, &users)?;
        info!("Registered user {username}");
        Ok(())
    }

    /// Check credentials and return the matching user.
    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }

        self.load()?
            .into_iter()
            .find(|u| u.username == username && u.password_matches(password))
            .ok_or(AuthError::InvalidCredentials)
    }

    /// True once at least one user has registered.
    pub fn has_users(&self) -> Result<bool, StoreError> {
        Ok(!self.load()?.is_empty())
    }

    fn load(&self) -> Result<Vec<User>, StoreError> {
        match read_optional(&self.path)? {
            Some(text) => serde_json::from_str(&text).map_err(StoreError::json(&self.path)),
            None => Ok(Vec::new()),
        }
    }
}
