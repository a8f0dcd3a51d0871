use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::credential::errors::CredentialError;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginOutcome;
use crate::credential::models::SignupCommand;
use crate::credential::models::UserCredential;
use crate::credential::ports::CredentialServicePort;
use crate::credential::ports::CredentialStore;

/// Domain service implementation for signup and login.
///
/// Argon2 work runs on the blocking pool.
pub struct CredentialService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
}

impl<S> CredentialService<S>
where
    S: CredentialStore,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(store: Arc<S>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<S> CredentialServicePort for CredentialService<S>
where
    S: CredentialStore,
{
    async fn signup(&self, command: SignupCommand) -> Result<UserCredential, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| CredentialError::Unknown(format!("Hashing task failed: {}", e)))??;

        let credential = self
            .store
            .insert(UserCredential::new(command.username, password_hash))
            .await?;

        tracing::info!(username = %credential.username, "User registered");

        Ok(credential)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, CredentialError> {
        let credential = self.store.find_by_username(&command.username).await?;

        // Unknown users still pay for a full Argon2 verification.
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = credential.as_ref().map(|c| c.password_hash.clone());
        let subject = command.username.to_string();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), password_hash.as_deref(), &subject)
        })
        .await
        .map_err(|e| CredentialError::Unknown(format!("Verification task failed: {}", e)))?;

        let result = match (result, credential.is_some()) {
            (Ok(result), _) => result,
            (Err(AuthenticationError::InvalidCredentials), false) => {
                return Err(CredentialError::NotFound(command.username.to_string()))
            }
            (Err(AuthenticationError::InvalidCredentials), true) => {
                return Err(CredentialError::InvalidCredentials)
            }
            (Err(AuthenticationError::PasswordError(e)), _) => return Err(e.into()),
            (Err(AuthenticationError::JwtError(e)), _) => return Err(e.into()),
        };

        tracing::info!(username = %command.username, "User logged in");

        Ok(LoginOutcome {
            username: command.username,
            access_token: result.access_token,
            expires_at: result.expires_at,
        })
    }
}
