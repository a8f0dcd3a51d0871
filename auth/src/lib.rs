//! Credential hashing and bearer token primitives.
//!
//! [`PasswordHasher`] turns plaintext passwords into self-describing Argon2id
//! PHC strings, [`JwtHandler`] issues and checks HS256 access tokens, and
//! [`Authenticator`] ties the two together for login.
//!
//! Nothing in this crate knows about HTTP; callers translate the typed
//! errors into their own transport responses.
//!
//! # Examples
//!
//! ## Hashing a password
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Issuing a token
//! ```
//! use auth::JwtHandler;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("alice").unwrap();
//! let identity = handler.verify(&token).unwrap();
//! assert_eq!(identity.subject, "alice");
//! ```
//!
//! ## Login
//! ```
//! use auth::Authenticator;
//!
//! let authenticator = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let hash = authenticator.hash_password("password123").unwrap();
//!
//! let result = authenticator.authenticate("password123", Some(&hash), "alice").unwrap();
//!
//! let identity = authenticator.validate_token(&result.access_token).unwrap();
//! assert_eq!(identity.subject, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
