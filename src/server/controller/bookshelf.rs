//! Bookshelf pages: permission gated book CRUD, search and the example contact form.
//!
//! POST handlers validate the CSRF token first, then the permission, and only then load
//! or change any record.

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use entity::sea_orm_active_enums::Permission;
use tower_sessions::Session;

use crate::server::{
    controller::util::{
        authorize::{require_login, require_permission},
        csrf::{validate_csrf, CsrfForm, CsrfOnly},
        get_user::get_user_from_session,
        page::page_context,
    },
    error::Error,
    form::{
        book::BookForm,
        example::{thank_you_message, ExampleForm},
        search::SearchForm,
        FormErrors,
    },
    model::{app::AppState, session::flash::SessionFlash},
    service::book::BookService,
    view,
};

pub async fn home(State(state): State<AppState>, session: Session) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let ctx = page_context(&session, user).await?;

    Ok(view::bookshelf::home(&ctx).into_response())
}

/// Lists every book
///
/// # Responses
/// - 200 (OK): Book list
/// - 403 (Forbidden): Missing `can_view`
pub async fn book_list(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::ViewBook)?;

    let books = BookService::new(&state.db).list().await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::bookshelf::book_list(&ctx, &books).into_response())
}

/// # Responses
/// - 200 (OK): Book details
/// - 403 (Forbidden): Missing `can_view`
/// - 404 (Not Found): No book with this ID
pub async fn book_detail(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::ViewBook)?;

    let book = BookService::new(&state.db).get(book_id).await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::bookshelf::book_detail(&ctx, &book).into_response())
}

pub async fn book_create_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::CreateBook)?;

    let ctx = page_context(&session, user).await?;
    Ok(view::bookshelf::book_form(
        &ctx,
        "Add Book",
        "/books/create/",
        &BookForm::default(),
        &FormErrors::default(),
    )
    .into_response())
}

/// Creates a book from the submitted form
///
/// # Responses
/// - 200 (OK): Validation failed, the form is shown again with errors
/// - 303 (See Other): Created, redirect to the new book
/// - 403 (Forbidden): CSRF validation failed or missing `can_create`
pub async fn book_create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CsrfForm<BookForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::CreateBook)?;

    let form = form.data;
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            let ctx = page_context(&session, user).await?;
            return Ok(
                view::bookshelf::book_form(&ctx, "Add Book", "/books/create/", &form, &errors)
                    .into_response(),
            );
        }
    };

    let book = BookService::new(&state.db).create(&valid).await?;

    SessionFlash::success(
        &session,
        format!("Book \"{}\" created successfully!", book.title),
    )
    .await?;

    Ok(Redirect::to(&format!("/books/{}/", book.id)).into_response())
}

pub async fn book_edit_page(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::EditBook)?;

    let book = BookService::new(&state.db).get(book_id).await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::bookshelf::book_form(
        &ctx,
        "Edit Book",
        &format!("/books/{}/edit/", book.id),
        &BookForm::from_model(&book),
        &FormErrors::default(),
    )
    .into_response())
}

/// Updates a book from the submitted form
///
/// # Responses
/// - 200 (OK): Validation failed, the form is shown again with errors
/// - 303 (See Other): Updated, redirect to the book
/// - 403 (Forbidden): CSRF validation failed or missing `can_edit`
/// - 404 (Not Found): No book with this ID
pub async fn book_edit(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
    Form(form): Form<CsrfForm<BookForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::EditBook)?;

    let book_service = BookService::new(&state.db);
    let book = book_service.get(book_id).await?;

    let form = form.data;
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            let ctx = page_context(&session, user).await?;
            let action = format!("/books/{}/edit/", book.id);
            return Ok(
                view::bookshelf::book_form(&ctx, "Edit Book", &action, &form, &errors)
                    .into_response(),
            );
        }
    };

    let book = book_service.update(book.id, &valid).await?;

    SessionFlash::success(
        &session,
        format!("Book \"{}\" updated successfully!", book.title),
    )
    .await?;

    Ok(Redirect::to(&format!("/books/{}/", book.id)).into_response())
}

pub async fn book_delete_page(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::DeleteBook)?;

    let book = BookService::new(&state.db).get(book_id).await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::bookshelf::book_confirm_delete(&ctx, &book).into_response())
}

/// Deletes a book
///
/// # Responses
/// - 303 (See Other): Deleted, redirect to the book list
/// - 403 (Forbidden): CSRF validation failed or missing `can_delete`
/// - 404 (Not Found): No book with this ID
pub async fn book_delete(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i32>,
    Form(form): Form<CsrfOnly>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let user = get_user_from_session(&state, &session).await?;
    require_permission(user.as_ref(), Permission::DeleteBook)?;

    let book = BookService::new(&state.db).delete(book_id).await?;

    SessionFlash::success(
        &session,
        format!("Book \"{}\" deleted successfully!", book.title),
    )
    .await?;

    Ok(Redirect::to("/books/").into_response())
}

/// Title search for logged in users, capped at 50 results
///
/// # Responses
/// - 200 (OK): Search form with results when a query remains after sanitizing
/// - 303 (See Other): Not logged in, redirect to the login page
pub async fn book_search(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(form): Query<SearchForm>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_login(user.as_ref(), &uri)?;

    let query = form.query();
    let books = match &query {
        Some(query) => BookService::new(&state.db).search(query).await?,
        None => Vec::new(),
    };

    let ctx = page_context(&session, user).await?;
    Ok(view::bookshelf::book_search(&ctx, query.as_deref(), &books).into_response())
}

pub async fn form_example_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let ctx = page_context(&session, user).await?;

    Ok(
        view::bookshelf::form_example(&ctx, &ExampleForm::default(), &FormErrors::default())
            .into_response(),
    )
}

/// Validates the contact form and redirects back to it with a thank you message
pub async fn form_example(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CsrfForm<ExampleForm>>,
) -> Result<Response, Error> {
    validate_csrf(&session, &form.csrf_token).await?;

    let form = form.data;
    match form.validate() {
        Ok(valid) => {
            tracing::info!(email = %valid.email, "contact form submitted");
            SessionFlash::success(&session, thank_you_message(&valid)).await?;

            Ok(Redirect::to("/form-example/").into_response())
        }
        Err(errors) => {
            let user = get_user_from_session(&state, &session).await?;
            let ctx = page_context(&session, user).await?;

            Ok(view::bookshelf::form_example(&ctx, &form, &errors).into_response())
        }
    }
}
