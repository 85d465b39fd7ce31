use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use entity::sea_orm_active_enums::Permission;
use tower_sessions::Session;

use crate::server::{
    controller::util::{
        authorize::require_permission,
        csrf::{validate_csrf, CsrfForm, CsrfOnly},
        get_user::get_user_from_session,
        page::page_context,
    },
    error::Error,
    form::{
        catalog::{CatalogBookForm, MISSING_TITLE_OR_AUTHOR},
        FormErrors, NON_FIELD_ERRORS,
    },
    model::{app::AppState, auth::AuthUser, session::flash::SessionFlash},
    service::catalog::CatalogService,
    view,
};

pub static BOOK_NOT_FOUND: &str = "Book not found.";

static BOOKS_URL: &str = "/relationship/books/";

pub async fn list_books(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let books = CatalogService::new(&state.db).list_books().await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::catalog::list_books(&ctx, &books).into_response())
}

/// Shows the library with the lowest ID, or an empty state when there is none
pub async fn first_library(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let detail = CatalogService::new(&state.db).library_detail(None).await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::catalog::library_detail(&ctx, detail.as_ref()).into_response())
}

/// # Responses
/// - 200 (OK): Library with its books and librarian
/// - 404 (Not Found): No library with this ID
pub async fn library_detail(
    State(state): State<AppState>,
    session: Session,
    Path(library_id): Path<i32>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let Some(detail) = CatalogService::new(&state.db)
        .library_detail(Some(library_id))
        .await?
    else {
        return Err(Error::NotFound(format!("library {}", library_id)));
    };

    let ctx = page_context(&session, user).await?;
    Ok(view::catalog::library_detail(&ctx, Some(&detail)).into_response())
}

/// Re-renders a book form after failed validation.
///
/// A missing title or author is reported as an error flash, length errors stay on
/// their fields.
async fn render_invalid(
    session: &Session,
    user: Option<AuthUser>,
    heading: &str,
    action: &str,
    form: &CatalogBookForm,
    errors: FormErrors,
) -> Result<Response, Error> {
    let errors = if errors.has(NON_FIELD_ERRORS) {
        SessionFlash::error(session, MISSING_TITLE_OR_AUTHOR).await?;
        FormErrors::default()
    } else {
        errors
    };

    let ctx = page_context(session, user).await?;
    Ok(view::catalog::book_form(&ctx, heading, action, form, &errors).into_response())
}

async fn book_not_found(session: &Session) -> Result<Response, Error> {
    SessionFlash::error(session, BOOK_NOT_FOUND).await?;

    Ok(Redirect::to(BOOKS_URL).into_response())
}

pub async fn add_book_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::AddCatalogBook)?;

    let ctx = page_context(&session, user).await?;
    Ok(view::catalog::book_form(
        &ctx,
        "Add Book",
        "/relationship/add_book/",
        &CatalogBookForm::default(),
        &FormErrors::default(),
    )
    .into_response())
}

/// Adds a catalog book, creating its author if needed
///
/// # Responses
/// - 200 (OK): Validation failed, the form is shown again
/// - 303 (See Other): Added, redirect to the catalog list
/// - 403 (Forbidden): CSRF validation failed or missing `can_add_book`
pub async fn add_book(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CsrfForm<CatalogBookForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::AddCatalogBook)?;

    let form = form.data;
    let (title, author) = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            return render_invalid(
                &session,
                user,
                "Add Book",
                "/relationship/add_book/",
                &form,
                errors,
            )
            .await
        }
    };

    let book = CatalogService::new(&state.db).add_book(&title, &author).await?;

    SessionFlash::success(
        &session,
        format!("Book \"{}\" added successfully!", book.title),
    )
    .await?;

    Ok(Redirect::to(BOOKS_URL).into_response())
}

pub async fn edit_book_page(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::ChangeCatalogBook)?;

    let Some((book, author)) = CatalogService::new(&state.db).get_book(book_id).await? else {
        return book_not_found(&session).await;
    };

    let form = CatalogBookForm {
        title: book.title,
        author: author.map(|a| a.name).unwrap_or_default(),
    };

    let ctx = page_context(&session, user).await?;
    Ok(view::catalog::book_form(
        &ctx,
        "Edit Book",
        &format!("/relationship/edit_book/{}/", book.id),
        &form,
        &FormErrors::default(),
    )
    .into_response())
}

/// Changes a catalog book's title and author
///
/// # Responses
/// - 200 (OK): Validation failed, the form is shown again
/// - 303 (See Other): Updated, or the book does not exist, redirect to the catalog list
/// - 403 (Forbidden): CSRF validation failed or missing `can_change_book`
pub async fn edit_book(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
    Form(form): Form<CsrfForm<CatalogBookForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::ChangeCatalogBook)?;

    let catalog_service = CatalogService::new(&state.db);
    if catalog_service.get_book(book_id).await?.is_none() {
        return book_not_found(&session).await;
    }

    let form = form.data;
    let (title, author) = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            let action = format!("/relationship/edit_book/{}/", book_id);
            return render_invalid(&session, user, "Edit Book", &action, &form, errors).await;
        }
    };

    let Some(book) = catalog_service.edit_book(book_id, &title, &author).await? else {
        return book_not_found(&session).await;
    };

    SessionFlash::success(
        &session,
        format!("Book \"{}\" updated successfully!", book.title),
    )
    .await?;

    Ok(Redirect::to(BOOKS_URL).into_response())
}

pub async fn delete_book_page(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::DeleteCatalogBook)?;

    let Some((book, _)) = CatalogService::new(&state.db).get_book(book_id).await? else {
        return book_not_found(&session).await;
    };

    let ctx = page_context(&session, user).await?;
    Ok(view::catalog::delete_confirm(&ctx, &book).into_response())
}

/// # Responses
/// - 303 (See Other): Deleted, or the book does not exist, redirect to the catalog list
/// - 403 (Forbidden): CSRF validation failed or missing `can_delete_book`
pub async fn delete_book(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
    Form(form): Form<CsrfOnly>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::DeleteCatalogBook)?;

    let Some(book) = CatalogService::new(&state.db).delete_book(book_id).await? else {
        return book_not_found(&session).await;
    };

    SessionFlash::success(
        &session,
        format!("Book \"{}\" deleted successfully!", book.title),
    )
    .await?;

    Ok(Redirect::to(BOOKS_URL).into_response())
}
