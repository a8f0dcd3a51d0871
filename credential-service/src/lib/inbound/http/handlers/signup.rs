use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::CredentialError;
use crate::credential::models::Password;
use crate::credential::models::SignupCommand;
use crate::credential::models::Username;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .credential_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::CREATED,
                SignupResponseData {
                    message: "User registered!".to_string(),
                },
            )
        })
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    username: String,
    password: String,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, CredentialError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok(SignupCommand::new(username, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub message: String,
}
