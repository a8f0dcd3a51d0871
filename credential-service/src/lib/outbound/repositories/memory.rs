use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credential::errors::CredentialError;
use crate::credential::models::UserCredential;
use crate::credential::models::Username;
use crate::credential::ports::CredentialStore;
use crate::portfolio::errors::PortfolioError;
use crate::portfolio::models::Holding;
use crate::portfolio::models::Position;
use crate::portfolio::ports::PortfolioRepository;

/// Process-local credential store.
///
/// Contents are lost on restart. Used for local runs (`storage.backend = "memory"`)
/// and integration tests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, UserCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredential>, CredentialError> {
        let credentials = self.credentials.read().await;
        Ok(credentials.get(username.as_str()).cloned())
    }

    async fn insert(&self, credential: UserCredential) -> Result<UserCredential, CredentialError> {
        let mut credentials = self.credentials.write().await;

        match credentials.entry(credential.username.as_str().to_string()) {
            Entry::Occupied(_) => Err(CredentialError::UsernameAlreadyExists(
                credential.username.to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(credential.clone());
                Ok(credential)
            }
        }
    }
}

/// Fixed, process-local holdings and positions.
#[derive(Default)]
pub struct InMemoryPortfolioRepository {
    holdings: Vec<Holding>,
    positions: Vec<Position>,
}

impl InMemoryPortfolioRepository {
    pub fn new(holdings: Vec<Holding>, positions: Vec<Position>) -> Self {
        Self {
            holdings,
            positions,
        }
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn list_holdings(&self) -> Result<Vec<Holding>, PortfolioError> {
        Ok(self.holdings.clone())
    }

    async fn list_positions(&self) -> Result<Vec<Position>, PortfolioError> {
        Ok(self.positions.clone())
    }
}
