use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::credential::errors::CredentialError;
use crate::portfolio::errors::PortfolioError;

pub mod health;
pub mod login;
pub mod portfolio;
pub mod protected;
pub mod signup;

/// Fixed signup failure message; does not say which uniqueness check failed.
pub const USER_EXISTS_MESSAGE: &str = "User already exists!";
/// Shared login failure message for unknown users and wrong passwords.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    UnsupportedMediaType(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidUsername(_) | CredentialError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            CredentialError::UsernameAlreadyExists(_) => {
                ApiError::Conflict(USER_EXISTS_MESSAGE.to_string())
            }
            CredentialError::NotFound(_) | CredentialError::InvalidCredentials => {
                tracing::debug!(reason = %err, "Login rejected");
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            CredentialError::Password(_)
            | CredentialError::Token(_)
            | CredentialError::Storage(_)
            | CredentialError::Unknown(_) => {
                tracing::error!(error = %err, "Credential operation failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity(rejection.body_text()),
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::UnsupportedMediaType(rejection.body_text())
            }
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<PortfolioError> for ApiError {
    fn from(err: PortfolioError) -> Self {
        tracing::error!(error = %err, "Portfolio read failed");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::errors::UsernameError;

    #[test]
    fn test_duplicate_username_has_fixed_message() {
        let err = ApiError::from(CredentialError::UsernameAlreadyExists("alice".to_string()));
        assert_eq!(err, ApiError::Conflict(USER_EXISTS_MESSAGE.to_string()));
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let not_found = ApiError::from(CredentialError::NotFound("alice".to_string()));
        let wrong_password = ApiError::from(CredentialError::InvalidCredentials);

        assert_eq!(not_found, wrong_password);
        assert_eq!(
            not_found,
            ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_validation_error_is_unprocessable() {
        let err = ApiError::from(CredentialError::InvalidUsername(UsernameError::Empty));
        assert!(matches!(err, ApiError::UnprocessableEntity(msg) if msg.contains("empty")));
    }

    #[test]
    fn test_storage_failure_hides_cause() {
        let err = ApiError::from(CredentialError::Storage(
            "password authentication failed for user postgres".to_string(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (ApiError::UnprocessableEntity(String::new()), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::BadRequest(String::new()), StatusCode::BAD_REQUEST),
            (
                ApiError::UnsupportedMediaType(String::new()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (ApiError::Conflict(String::new()), StatusCode::CONFLICT),
            (ApiError::Unauthorized(String::new()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden(String::new()), StatusCode::FORBIDDEN),
            (
                ApiError::InternalServerError(String::new()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
