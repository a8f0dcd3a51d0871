use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;

use crate::inbound::http::handlers::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Why the gate refused a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateRejection {
    /// No usable bearer credential was presented.
    #[error("{0}")]
    Unauthenticated(&'static str),

    /// A token was presented but failed verification.
    #[error("Token rejected: {0}")]
    Forbidden(#[from] JwtError),
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        match rejection {
            GateRejection::Unauthenticated(reason) => ApiError::Unauthorized(reason.to_string()),
            GateRejection::Forbidden(_) => {
                ApiError::Forbidden("Invalid or expired token".to_string())
            }
        }
    }
}

/// Middleware that admits only requests carrying a valid bearer token.
///
/// Missing or malformed `Authorization` headers are rejected with 401; tokens
/// that fail verification are rejected with 403.
pub async fn authorize(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate_headers(&authenticator, req.headers()).map_err(|rejection| {
        tracing::warn!(reason = %rejection, uri = %req.uri(), "Request rejected by authorization gate");
        ApiError::from(rejection)
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Resolve the identity carried by a request's headers.
pub fn authenticate_headers(
    authenticator: &Authenticator,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, GateRejection> {
    let token = extract_bearer_token(headers)?;
    let identity = authenticator.validate_token(token)?;

    Ok(AuthenticatedUser {
        username: identity.subject,
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, GateRejection> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(GateRejection::Unauthenticated("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| GateRejection::Unauthenticated("Invalid Authorization header"))?;

    let token = auth_str
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(GateRejection::Unauthenticated(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ))?;

    Ok(token)
}
