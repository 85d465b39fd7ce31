//! One-shot flash messages shown on the next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_FLASH_KEY: &str = "libris:flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

impl FlashLevel {
    /// CSS class used when rendering the message
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionFlash(pub Vec<FlashMessage>);

impl SessionFlash {
    /// Queue a message for the next page render
    pub async fn push(
        session: &Session,
        level: FlashLevel,
        text: impl Into<String>,
    ) -> Result<(), Error> {
        let mut messages = session
            .get::<SessionFlash>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default();

        messages.0.push(FlashMessage {
            level,
            text: text.into(),
        });

        session.insert(SESSION_FLASH_KEY, messages).await?;

        Ok(())
    }

    pub async fn success(session: &Session, text: impl Into<String>) -> Result<(), Error> {
        Self::push(session, FlashLevel::Success, text).await
    }

    pub async fn error(session: &Session, text: impl Into<String>) -> Result<(), Error> {
        Self::push(session, FlashLevel::Error, text).await
    }

    /// Removes and returns every queued message
    pub async fn take(session: &Session) -> Result<Vec<FlashMessage>, Error> {
        Ok(session
            .remove::<SessionFlash>(SESSION_FLASH_KEY)
            .await?
            .map(|SessionFlash(messages)| messages)
            .unwrap_or_default())
    }
}
