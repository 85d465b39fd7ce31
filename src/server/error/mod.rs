//! Error types for the Libris server.
//!
//! Each domain (authentication, configuration, user management) has its own `thiserror`
//! enum with an `IntoResponse` implementation. They are aggregated into [`Error`] so
//! handlers can use `?` on anything from a database query to a session read.

pub mod auth;
pub mod config;
pub mod user;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{ErrorDto, ValidationErrorDto},
    server::{
        error::{auth::AuthError, config::ConfigError, user::UserError},
        form::FormErrors,
    },
};

/// Main error type for the Libris server.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication and authorization errors (login, permissions, tokens, CSRF)
/// - User management errors (duplicate usernames, unknown users or groups)
/// - Validation errors raised by the JSON API
/// - External library errors (database, sessions)
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    AuthError(#[from] AuthError),
    #[error(transparent)]
    UserError(#[from] UserError),
    /// Submitted data failed validation, carries per-field messages.
    #[error(transparent)]
    Validation(#[from] FormErrors),
    /// Request body could not be read as JSON.
    #[error("Malformed request body: {0}")]
    BadRequest(String),
    #[error("Request body is not declared as JSON")]
    UnsupportedMediaType,
    /// Requested record does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Password hashing failed, which only happens on invalid hasher parameters.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
    /// Internal error indicating a bug in Libris.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 303 See Other - Login required, redirects to the login page
/// - 400 Bad Request - Validation failures, malformed JSON, bad credentials, duplicate
///   usernames
/// - 401 Unauthorized - Missing or unknown API token
/// - 403 Forbidden - Missing permission or failed CSRF validation
/// - 404 Not Found - Missing records
/// - 415 Unsupported Media Type - JSON body sent without a JSON content type
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::UserError(err) => err.into_response(),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorDto {
                    errors: errors.into_inner(),
                }),
            )
                .into_response(),
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: format!("JSON parse error - {}", message),
                }),
            )
                .into_response(),
            Self::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorDto {
                    error: "Unsupported media type, expected application/json.".to_string(),
                }),
            )
                .into_response(),
            Self::NotFound(what) => {
                tracing::debug!(what = %what, "record not found");

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: "Not found.".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
