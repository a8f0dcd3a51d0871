use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PhcError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Fixed salt and all-zero 32 byte output for the decoy PHC string.
const DECOY_SALT: &str = "c29tZXNhbHRzb21lc2FsdA";
const DECOY_OUTPUT: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Work factor for Argon2id hashing.
///
/// Raising any of these makes each hash (and each login) more expensive.
/// Hashes store their own parameters, so changing the cost never invalidates
/// credentials that are already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    /// Memory size in KiB (`m_cost`)
    pub memory_kib: u32,
    /// Number of passes (`t_cost`)
    pub iterations: u32,
    /// Degree of parallelism (`p_cost`)
    pub parallelism: u32,
}

impl Default for HashingCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    decoy_hash: String,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            decoy_hash: decoy_hash(HashingCost::default()),
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Parameters are outside Argon2's accepted ranges
    pub fn with_cost(cost: HashingCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            decoy_hash: decoy_hash(cost),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated on every call.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters and salt are read from the stored hash, not from this
    /// hasher's configured cost.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidHashFormat` - Hash is not a parseable Argon2 PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(e) => Err(PasswordError::InvalidHashFormat(e.to_string())),
        }
    }

    /// Run a full verification that can never succeed.
    ///
    /// Costs the same as [`verify`](Self::verify) against a hash produced by
    /// this hasher. Callers use it when there is no stored hash to check.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify(password, &self.decoy_hash);
    }
}

fn decoy_hash(cost: HashingCost) -> String {
    format!(
        "$argon2id$v=19$m={},t={},p={}${}${}",
        cost.memory_kib, cost.iterations, cost.parallelism, DECOY_SALT, DECOY_OUTPUT
    )
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
