use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token claims.
///
/// Serialized as the JWT payload using the registered claim names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username the token asserts)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `subject` issued at `now`, valid for `lifetime`.
    pub fn new(subject: impl ToString, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let issued_at = now.timestamp();

        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + lifetime.num_seconds(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at the exact second of `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Expiration as a UTC timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }
}

/// Identity bound to a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
        }
    }
}
