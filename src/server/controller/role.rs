use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::Role;
use tower_sessions::Session;

use crate::server::{
    controller::util::{
        authorize::require_role, get_user::get_user_from_session, page::page_context,
    },
    error::Error,
    model::app::AppState,
    view,
};

/// Renders the landing page of `role`, redirecting anyone else to the login page
async fn role_view(
    state: &AppState,
    session: &Session,
    uri: &Uri,
    role: Role,
) -> Result<Response, Error> {
    let user = get_user_from_session(state, session).await?;
    require_role(user.as_ref(), role, uri)?;

    let ctx = page_context(session, user).await?;
    Ok(view::role::role_page(&ctx, role).into_response())
}

pub async fn admin_view(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
) -> Result<Response, Error> {
    role_view(&state, &session, &uri, Role::Admin).await
}

pub async fn librarian_view(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
) -> Result<Response, Error> {
    role_view(&state, &session, &uri, Role::Librarian).await
}

pub async fn member_view(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
) -> Result<Response, Error> {
    role_view(&state, &session, &uri, Role::Member).await
}
