use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::token::AuthTokenRepository,
    error::{auth::AuthError, Error},
    model::auth::AuthUser,
    service::auth::AuthService,
    util::token::generate_token_key,
};

/// API token issuing and verification.
pub struct TokenService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TokenService<'a> {
    /// Creates a new instance of [`TokenService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Exchanges credentials for the user's API token.
    ///
    /// The token is created on first use and the same key is returned afterwards.
    ///
    /// # Returns
    /// - `Ok(String)` - Token key
    /// - `Err(Error::AuthError(AuthError::InvalidCredentials))` - Bad credentials or inactive user
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn obtain(&self, username: &str, password: &str) -> Result<String, Error> {
        let Some(user) = AuthService::new(self.db)
            .authenticate(username, password)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let token_repo = AuthTokenRepository::new(self.db);

        if let Some(token) = token_repo.find_by_user(user.id).await? {
            return Ok(token.key);
        }

        let token = token_repo
            .create(user.id, generate_token_key(), Utc::now().naive_utc())
            .await?;

        tracing::info!(user_id = user.id, "issued API token");

        Ok(token.key)
    }

    /// Resolves a token key to the authenticated user.
    ///
    /// # Returns
    /// - `Ok(AuthUser)` - Token belongs to an active user
    /// - `Err(Error::AuthError(AuthError::InvalidToken))` - Unknown key or inactive user
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn authenticate(&self, key: &str) -> Result<AuthUser, Error> {
        let owner = AuthTokenRepository::new(self.db)
            .find_by_key(key)
            .await?
            .and_then(|(_, user)| user)
            .filter(|user| user.is_active);

        let Some(owner) = owner else {
            tracing::warn!(target: "security", "rejected invalid API token");
            return Err(AuthError::InvalidToken.into());
        };

        AuthService::new(self.db)
            .load_auth_user(owner.id)
            .await?
            .ok_or_else(|| AuthError::InvalidToken.into())
    }
}
