use tower_sessions::Session;

use crate::server::{
    error::Error,
    model::{app::AppState, auth::AuthUser, session::user::SessionUserId},
    service::auth::AuthService,
};

/// Retrieves the logged in user from the session and then from the database
///
/// # Arguments
/// - `state`: Application state with the database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(Some(AuthUser))`: User found, with role and effective permissions
/// - `Ok(None)`: Anonymous visitor, or the session pointed at a user that no longer
///   exists (the session is flushed)
/// - `Err(Error)`: Database query or session failures
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<Option<AuthUser>, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Ok(None);
    };

    let Some(user) = AuthService::new(&state.db).load_auth_user(user_id).await? else {
        session.flush().await?;

        tracing::debug!(
            user_id,
            "session flushed for user ID with active session but not found in database"
        );

        return Ok(None);
    };

    Ok(Some(user))
}
