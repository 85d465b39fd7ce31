use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    controller::util::{
        csrf::{validate_csrf, CsrfForm, CsrfOnly},
        get_user::get_user_from_session,
        page::page_context,
    },
    error::{user::UserError, Error},
    form::{
        user::{LoginForm, UserCreationForm},
        FormErrors, NON_FIELD_ERRORS,
    },
    model::{
        app::AppState,
        session::{csrf::SessionCsrfToken, flash::SessionFlash, user::SessionUserId},
    },
    service::{auth::AuthService, user::UserService},
    util::redirect::safe_next,
    view::{self, layout::PageContext},
};

pub static INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

pub static USERNAME_TAKEN: &str = "A user with that username already exists.";

#[derive(Deserialize, Default)]
pub struct NextParams {
    pub next: Option<String>,
}

/// Login page
///
/// # Responses
/// - 200 (OK): Login form, `next` is carried in a hidden field
/// - 303 (See Other): Already logged in, redirect to `next`
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<NextParams>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let next = safe_next(params.next.as_deref());

    if user.is_some() {
        return Ok(Redirect::to(&next).into_response());
    }

    let ctx = page_context(&session, None).await?;

    Ok(view::auth::login(&ctx, "", &next, &FormErrors::default()).into_response())
}

/// Verifies credentials and logs the user in
///
/// The session ID is cycled and the CSRF token rotated before the user ID is stored.
///
/// # Responses
/// - 200 (OK): Invalid input or credentials, the form is shown again with errors
/// - 303 (See Other): Logged in, redirect to `next` or `/`
/// - 403 (Forbidden): CSRF validation failed
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CsrfForm<LoginForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let form = form.data;
    let next = safe_next(form.next.as_deref());

    if let Err(errors) = form.validate() {
        let ctx = page_context(&session, None).await?;
        return Ok(view::auth::login(&ctx, &form.username, &next, &errors).into_response());
    }

    let Some(user) = AuthService::new(&state.db)
        .authenticate(form.username.trim(), &form.password)
        .await?
    else {
        let mut errors = FormErrors::default();
        errors.add(NON_FIELD_ERRORS, INVALID_LOGIN);

        let ctx = page_context(&session, None).await?;
        return Ok(view::auth::login(&ctx, &form.username, &next, &errors).into_response());
    };

    SessionUserId::login(&session, user.id).await?;
    SessionCsrfToken::rotate(&session).await?;
    UserService::new(&state.db).record_login(user.id).await?;

    tracing::info!(user_id = user.id, username = %user.username, "user logged in");

    Ok(Redirect::to(&next).into_response())
}

pub async fn register_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let ctx = page_context(&session, user).await?;

    Ok(
        view::auth::register(&ctx, &UserCreationForm::default(), &FormErrors::default())
            .into_response(),
    )
}

/// Creates a member account and logs it in
///
/// # Responses
/// - 200 (OK): Validation failed or the username is taken, the form is shown again
/// - 303 (See Other): Registered, redirect to `/` with a flash message
/// - 403 (Forbidden): CSRF validation failed
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CsrfForm<UserCreationForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let form = form.data;
    let new_user = match form.validate() {
        Ok(new_user) => new_user,
        Err(errors) => return render_register(&state, &session, &form, &errors).await,
    };

    let user = match UserService::new(&state.db).create_user(&new_user).await {
        Ok(user) => user,
        Err(Error::UserError(UserError::UsernameTaken(_))) => {
            let mut errors = FormErrors::default();
            errors.add("username", USERNAME_TAKEN);

            return render_register(&state, &session, &form, &errors).await;
        }
        Err(err) => return Err(err),
    };

    SessionUserId::login(&session, user.id).await?;
    SessionCsrfToken::rotate(&session).await?;
    SessionFlash::success(&session, "Registration successful!").await?;

    Ok(Redirect::to("/").into_response())
}

async fn render_register(
    state: &AppState,
    session: &Session,
    form: &UserCreationForm,
    errors: &FormErrors,
) -> Result<Response, Error> {
    let user = get_user_from_session(state, session).await?;
    let ctx = page_context(session, user).await?;

    Ok(view::auth::register(&ctx, form, errors).into_response())
}

/// Asks for confirmation, logging out only happens on POST
pub async fn logout_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let ctx = page_context(&session, user).await?;

    Ok(view::auth::logout_confirm(&ctx).into_response())
}

/// Logs the user out by flushing their session
///
/// # Responses
/// - 200 (OK): Logged out page
/// - 403 (Forbidden): CSRF validation failed
pub async fn logout(session: Session, Form(form): Form<CsrfOnly>) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    if let Some(user_id) = SessionUserId::get(&session).await? {
        tracing::info!(user_id, "user logged out");
    }

    session.flush().await?;

    let ctx = PageContext {
        user: None,
        flashes: Vec::new(),
        csrf_token: String::new(),
    };

    Ok(view::auth::logged_out(&ctx).into_response())
}
