use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use entity::sea_orm_active_enums::Permission;
use tower_sessions::Session;

use crate::server::{
    controller::{
        auth::USERNAME_TAKEN,
        util::{
            authorize::require_staff_permission,
            csrf::{validate_csrf, CsrfForm, CsrfOnly},
            get_user::get_user_from_session,
            page::page_context,
        },
    },
    error::{user::UserError, Error},
    form::{
        admin::AdminQuery,
        user::{UserChangeForm, UserCreationForm},
        FormErrors,
    },
    model::{app::AppState, session::flash::SessionFlash, user::UserFilter},
    service::user::UserService,
    view,
};

static USERS_URL: &str = "/admin/users/";

/// Users, searchable by username, names and email, filterable by staff, superuser and
/// active flags
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(query): Query<AdminQuery>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff_permission(user.as_ref(), Permission::ViewUser, &uri)?;

    let users = UserService::new(&state.db)
        .list_users(&UserFilter {
            search: query.search(),
            is_staff: query.is_staff(),
            is_superuser: query.is_superuser(),
            is_active: query.is_active(),
        })
        .await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::users(&ctx, &query, &users).into_response())
}

pub async fn add_page(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff_permission(user.as_ref(), Permission::CreateUser, &uri)?;

    let ctx = page_context(&session, user).await?;
    Ok(
        view::admin::user_add(&ctx, &UserCreationForm::default(), &FormErrors::default())
            .into_response(),
    )
}

/// Creates a member account through the user creation form
///
/// # Responses
/// - 200 (OK): Validation failed or the username is taken
/// - 303 (See Other): Created, redirect to the user's change page
/// - 403 (Forbidden): CSRF validation failed or missing user `can_create`
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Form(form): Form<CsrfForm<UserCreationForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_staff_permission(user.as_ref(), Permission::CreateUser, &uri)?;

    let form = form.data;
    let errors = match form.validate() {
        Ok(new_user) => match UserService::new(&state.db).create_user(&new_user).await {
            Ok(created) => {
                SessionFlash::success(
                    &session,
                    format!("The user \"{}\" was added successfully.", created.username),
                )
                .await?;

                return Ok(
                    Redirect::to(&format!("{}{}/change/", USERS_URL, created.id)).into_response(),
                );
            }
            Err(Error::UserError(UserError::UsernameTaken(_))) => {
                let mut errors = FormErrors::default();
                errors.add("username", USERNAME_TAKEN);
                errors
            }
            Err(err) => return Err(err),
        },
        Err(errors) => errors,
    };

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::user_add(&ctx, &form, &errors).into_response())
}

pub async fn change_page(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(user_id): Path<i32>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff_permission(user.as_ref(), Permission::EditUser, &uri)?;

    let Some((target, role)) = UserService::new(&state.db).get_user(user_id).await? else {
        return Err(Error::NotFound(format!("user {}", user_id)));
    };

    let form = UserChangeForm::from_model(&target, role);

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::user_change(&ctx, &target, &form, &FormErrors::default()).into_response())
}

/// Applies account, flag and role changes
///
/// # Responses
/// - 200 (OK): Validation failed, the form is shown again
/// - 303 (See Other): Saved, redirect to the user list
/// - 403 (Forbidden): CSRF validation failed or missing user `can_edit`
/// - 404 (Not Found): No user with this ID
pub async fn change(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(user_id): Path<i32>,
    Form(form): Form<CsrfForm<UserChangeForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_staff_permission(user.as_ref(), Permission::EditUser, &uri)?;

    let user_service = UserService::new(&state.db);
    let Some((target, _)) = user_service.get_user(user_id).await? else {
        return Err(Error::NotFound(format!("user {}", user_id)));
    };

    let form = form.data;
    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(errors) => {
            let ctx = page_context(&session, user).await?;
            return Ok(view::admin::user_change(&ctx, &target, &form, &errors).into_response());
        }
    };

    let Some(updated) = user_service.update_user(user_id, &changes).await? else {
        return Err(Error::NotFound(format!("user {}", user_id)));
    };

    tracing::info!(
        user_id = updated.id,
        changed_by = user.as_ref().map(|u| u.id()),
        "user changed through admin"
    );

    SessionFlash::success(
        &session,
        format!("The user \"{}\" was changed successfully.", updated.username),
    )
    .await?;

    Ok(Redirect::to(USERS_URL).into_response())
}

pub async fn delete_page(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(user_id): Path<i32>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff_permission(user.as_ref(), Permission::DeleteUser, &uri)?;

    let Some((target, _)) = UserService::new(&state.db).get_user(user_id).await? else {
        return Err(Error::NotFound(format!("user {}", user_id)));
    };

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::user_delete_confirm(&ctx, &target).into_response())
}

/// # Responses
/// - 303 (See Other): Deleted, redirect to the user list
/// - 403 (Forbidden): CSRF validation failed or missing user `can_delete`
/// - 404 (Not Found): No user with this ID
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(user_id): Path<i32>,
    Form(form): Form<CsrfOnly>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_staff_permission(user.as_ref(), Permission::DeleteUser, &uri)?;

    let user_service = UserService::new(&state.db);
    let Some((target, _)) = user_service.get_user(user_id).await? else {
        return Err(Error::NotFound(format!("user {}", user_id)));
    };
    user_service.delete_user(target.id).await?;

    tracing::info!(
        user_id = target.id,
        deleted_by = user.as_ref().map(|u| u.id()),
        "user deleted through admin"
    );

    SessionFlash::success(
        &session,
        format!("The user \"{}\" was deleted successfully.", target.username),
    )
    .await?;

    Ok(Redirect::to(USERS_URL).into_response())
}
