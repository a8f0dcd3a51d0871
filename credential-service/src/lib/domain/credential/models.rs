use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::credential::errors::PasswordPolicyError;
use crate::credential::errors::UsernameError;

/// Stored credential for one user.
///
/// `password_hash` is a PHC string and is never rendered by `Debug`.
#[derive(Clone)]
pub struct UserCredential {
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserCredential {
    /// Build a credential for a freshly hashed password.
    pub fn new(username: Username, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Username value type
///
/// Ensures username is 1-32 characters and contains only alphanumeric,
/// underscore, hyphen and dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains characters other than ASCII alphanumerics, `_`, `-` and `.`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as received from a client.
///
/// Only lives for the duration of a signup or login call.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MAX_BYTES: usize = 128;

    /// Create a new password, rejecting empty or oversized input.
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        if password.len() > Self::MAX_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_BYTES,
                actual: password.len(),
            });
        }
        Ok(Self(password))
    }

    /// Borrow the plaintext. Callers must not log or persist it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new user with validated input
#[derive(Debug)]
pub struct SignupCommand {
    pub username: Username,
    pub password: Password,
}

impl SignupCommand {
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// Command to authenticate an existing user
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub username: Username,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}
