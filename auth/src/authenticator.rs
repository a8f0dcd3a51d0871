use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::HashingCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the only copy of the signing secret (inside the JWT keys) for the
/// lifetime of the process.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Instant the access token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost and token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Create an authenticator with explicit hashing cost and token lifetime.
    ///
    /// # Errors
    /// * `InvalidCost` - Hashing parameters are out of range
    pub fn with_settings(
        jwt_secret: &[u8],
        hashing_cost: HashingCost,
        token_lifetime: Duration,
    ) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_cost(hashing_cost)?,
            jwt_handler: JwtHandler::with_lifetime(jwt_secret, token_lifetime),
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// `stored_hash` is `None` when the subject has no stored credential. The
    /// password is then checked against a decoy hash of the same cost, so both
    /// rejections take the same time. Runs Argon2 on the calling thread.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No stored hash, or password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let Some(stored_hash) = stored_hash else {
            self.password_hasher.verify_decoy(password);
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used once the caller has already verified the credentials.
    pub fn issue_token(&self, subject: &str) -> Result<AuthenticationResult, JwtError> {
        let now = Utc::now();
        let access_token = self.jwt_handler.issue_at(subject, now)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: now + self.jwt_handler.lifetime(),
        })
    }

    /// Validate a token and return the identity it asserts.
    pub fn validate_token(&self, token: &str) -> Result<Identity, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Validate a token against an explicit clock reading.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, JwtError> {
        self.jwt_handler.verify_at(token, now)
    }

    /// Encode pre-built claims. Mostly useful for tests and tooling.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }
}
