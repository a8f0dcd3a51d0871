use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::CredentialError;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginOutcome;
use crate::credential::models::Password;
use crate::credential::models::Username;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .credential_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, CredentialError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok(LoginCommand::new(username, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<LoginOutcome> for LoginResponseData {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.access_token,
            expires_at: outcome.expires_at,
        }
    }
}
