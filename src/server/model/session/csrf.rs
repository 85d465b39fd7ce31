//! Per-session CSRF token.
//!
//! Every rendered form embeds the token as a hidden `csrf_token` field and every
//! state-changing POST must echo it back. The token lives as long as the session and is
//! rotated at login.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::{error::Error, util::token::generate_csrf_token};

pub const SESSION_CSRF_TOKEN_KEY: &str = "libris:csrf:token";

/// Name of the hidden form field carrying the token
pub const CSRF_FIELD: &str = "csrf_token";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionCsrfToken(pub String);

impl SessionCsrfToken {
    /// Returns the session's token, creating and storing one on first use.
    pub async fn get_or_create(session: &Session) -> Result<String, Error> {
        if let Some(token) = Self::get(session).await? {
            return Ok(token);
        }

        let token = generate_csrf_token();
        session
            .insert(SESSION_CSRF_TOKEN_KEY, SessionCsrfToken(token.clone()))
            .await?;

        Ok(token)
    }

    /// Drops the token so the next render issues a new one
    pub async fn rotate(session: &Session) -> Result<(), Error> {
        session
            .remove::<SessionCsrfToken>(SESSION_CSRF_TOKEN_KEY)
            .await?;

        Ok(())
    }

    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        Ok(session
            .get::<SessionCsrfToken>(SESSION_CSRF_TOKEN_KEY)
            .await?
            .map(|SessionCsrfToken(token)| token))
    }
}
