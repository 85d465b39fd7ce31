use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::session::csrf::SessionCsrfToken,
};

/// A submitted form together with its hidden CSRF field.
///
/// Fields of `T` must deserialize from strings so they can be flattened out of an
/// urlencoded body.
#[derive(Deserialize, Debug)]
pub struct CsrfForm<T> {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(flatten)]
    pub data: T,
}

/// A form whose only field is the CSRF token, e.g. delete confirmations
#[derive(Deserialize, Debug, Default)]
pub struct CsrfOnly {
    #[serde(default)]
    pub csrf_token: String,
}

/// Validate that the session CSRF token exists and matches `submitted`.
/// Returns `Ok(())` when valid or a 403 `Error` otherwise.
pub async fn validate_csrf(session: &Session, submitted: &str) -> Result<(), Error> {
    let stored = SessionCsrfToken::get(session).await?;

    if let Some(token) = stored {
        if !submitted.is_empty() && token == submitted {
            return Ok(());
        }
    }

    tracing::warn!(target: "security", "CSRF validation failed");

    Err(Error::AuthError(AuthError::CsrfValidationFailed))
}
