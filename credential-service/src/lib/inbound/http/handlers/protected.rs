use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Example protected route; only reachable through the authorization gate.
pub async fn protected(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProtectedResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: format!("Hello, {}! This is a protected route.", user.username),
            username: user.username,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResponseData {
    pub message: String,
    pub username: String,
}
