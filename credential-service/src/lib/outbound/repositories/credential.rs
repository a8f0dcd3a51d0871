use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::credential::errors::CredentialError;
use crate::credential::models::UserCredential;
use crate::credential::models::Username;
use crate::credential::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for UserCredential {
    type Error = CredentialError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)
            .map_err(|e| CredentialError::Storage(format!("Stored username is invalid: {}", e)))?;

        Ok(UserCredential {
            username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredential>, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::Storage(e.to_string()))?;

        row.map(UserCredential::try_from).transpose()
    }

    async fn insert(&self, credential: UserCredential) -> Result<UserCredential, CredentialError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(credential.username.as_str())
        .bind(&credential.password_hash)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return CredentialError::UsernameAlreadyExists(
                        credential.username.as_str().to_string(),
                    );
                }
            }
            CredentialError::Storage(e.to_string())
        })?;

        Ok(credential)
    }
}
