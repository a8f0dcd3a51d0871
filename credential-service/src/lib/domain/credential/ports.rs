use async_trait::async_trait;

use crate::credential::errors::CredentialError;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginOutcome;
use crate::credential::models::SignupCommand;
use crate::credential::models::UserCredential;
use crate::credential::models::Username;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Hashing failed
    /// * `Storage` - Store operation failed
    async fn signup(&self, command: SignupCommand) -> Result<UserCredential, CredentialError>;

    /// Check credentials and issue an access token.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is unusable
    /// * `Token` - Token generation failed
    /// * `Storage` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, CredentialError>;
}

/// Persistence operations for user credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a credential by username.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredential>, CredentialError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Storage` - Store operation failed
    async fn insert(&self, credential: UserCredential) -> Result<UserCredential, CredentialError>;
}
