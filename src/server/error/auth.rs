use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use entity::sea_orm_active_enums::Permission;
use thiserror::Error;

use crate::model::api::ErrorDto;

pub static LOGIN_URL: &str = "/login/";

#[derive(Error, Debug)]
pub enum AuthError {
    /// Page requires a logged in user passing a role or staff check.
    #[error("Login required to access {next}")]
    LoginRequired { next: String },
    #[error("Permission denied, missing {0:?}")]
    PermissionDenied(Permission),
    #[error("Authentication credentials were not provided")]
    MissingCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unable to log in with provided credentials")]
    InvalidCredentials,
    #[error("CSRF token missing or incorrect")]
    CsrfValidationFailed,
}

impl AuthError {
    fn unauthorized(message: &str) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Token")],
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }

    fn forbidden(message: &str) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::LoginRequired { next } => {
                tracing::debug!(next = %next, "redirecting to login");

                Redirect::to(&login_url(&next)).into_response()
            }
            Self::PermissionDenied(_) => {
                Self::forbidden("You do not have permission to perform this action.")
            }
            Self::MissingCredentials => {
                Self::unauthorized("Authentication credentials were not provided.")
            }
            Self::InvalidToken => Self::unauthorized("Invalid token."),
            Self::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "Unable to log in with provided credentials.".to_string(),
                }),
            )
                .into_response(),
            Self::CsrfValidationFailed => Self::forbidden("CSRF verification failed."),
        }
    }
}

/// Login page URL carrying `next` so the user returns after logging in
pub fn login_url(next: &str) -> String {
    format!("{}?next={}", LOGIN_URL, urlencoding::encode(next))
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{header, StatusCode},
        response::IntoResponse,
    };
    use entity::sea_orm_active_enums::Permission;

    use super::{login_url, AuthError};

    #[test]
    fn login_required_redirects_with_next() {
        let resp = AuthError::LoginRequired {
            next: "/relationship/admin-view/".to_string(),
        }
        .into_response();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/login/?next=%2Frelationship%2Fadmin-view%2F"
        );
    }

    #[test]
    fn permission_denied_is_forbidden() {
        let resp = AuthError::PermissionDenied(Permission::DeleteBook).into_response();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    /// Expect token challenges to advertise the Token scheme
    #[test]
    fn token_errors_are_unauthorized_with_challenge() {
        for err in [AuthError::MissingCredentials, AuthError::InvalidToken] {
            let resp = err.into_response();

            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(resp.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Token");
        }
    }

    #[test]
    fn encodes_query_characters_in_next() {
        assert_eq!(login_url("/books/?q=a b"), "/login/?next=%2Fbooks%2F%3Fq%3Da%20b");
    }
}
