use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        book::{ApiBookDto, ApiBookPayload},
    },
    server::{
        controller::api::{ApiJson, ApiUser}, error::Error, model::app::AppState,
        service::api_book::ApiBookService,
    },
};

pub static BOOK_TAG: &str = "books";

/// List all books
#[utoipa::path(
    get,
    path = "/api/books/",
    tag = BOOK_TAG,
    security(("token" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<ApiBookDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_books(
    State(state): State<AppState>,
    ApiUser(_user): ApiUser,
) -> Result<impl IntoResponse, Error> {
    let books = ApiBookService::new(&state.db).list().await?;

    Ok((StatusCode::OK, Json(books)))
}

/// List all books through the full CRUD collection
#[utoipa::path(
    get,
    path = "/api/books_all/",
    tag = BOOK_TAG,
    security(("token" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<ApiBookDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_all_books(
    State(state): State<AppState>,
    ApiUser(_user): ApiUser,
) -> Result<impl IntoResponse, Error> {
    let books = ApiBookService::new(&state.db).list().await?;

    Ok((StatusCode::OK, Json(books)))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/api/books_all/",
    tag = BOOK_TAG,
    security(("token" = [])),
    request_body = ApiBookPayload,
    responses(
        (status = 201, description = "Book created", body = ApiBookDto),
        (status = 400, description = "Invalid fields", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_book(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    ApiJson(payload): ApiJson<ApiBookPayload>,
) -> Result<impl IntoResponse, Error> {
    let book = ApiBookService::new(&state.db).create(&payload).await?;

    tracing::info!(book_id = book.id, user_id = user.id(), "created API book");

    Ok((StatusCode::CREATED, Json(book)))
}

/// Retrieve a book
#[utoipa::path(
    get,
    path = "/api/books_all/{id}/",
    tag = BOOK_TAG,
    security(("token" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "The book", body = ApiBookDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book(
    State(state): State<AppState>,
    ApiUser(_user): ApiUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let book = ApiBookService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(book)))
}

/// Replace a book, both fields are required
#[utoipa::path(
    put,
    path = "/api/books_all/{id}/",
    tag = BOOK_TAG,
    security(("token" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = ApiBookPayload,
    responses(
        (status = 200, description = "Book updated", body = ApiBookDto),
        (status = 400, description = "Invalid fields", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_book(
    State(state): State<AppState>,
    ApiUser(_user): ApiUser,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<ApiBookPayload>,
) -> Result<impl IntoResponse, Error> {
    let book = ApiBookService::new(&state.db)
        .update(id, &payload, false)
        .await?;

    Ok((StatusCode::OK, Json(book)))
}

/// Partially update a book, absent fields keep their value
#[utoipa::path(
    patch,
    path = "/api/books_all/{id}/",
    tag = BOOK_TAG,
    security(("token" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = ApiBookPayload,
    responses(
        (status = 200, description = "Book updated", body = ApiBookDto),
        (status = 400, description = "Invalid fields", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn partial_update_book(
    State(state): State<AppState>,
    ApiUser(_user): ApiUser,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<ApiBookPayload>,
) -> Result<impl IntoResponse, Error> {
    let book = ApiBookService::new(&state.db)
        .update(id, &payload, true)
        .await?;

    Ok((StatusCode::OK, Json(book)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books_all/{id}/",
    tag = BOOK_TAG,
    security(("token" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ApiBookService::new(&state.db).delete(id).await?;

    tracing::info!(book_id = id, user_id = user.id(), "deleted API book");

    Ok(StatusCode::NO_CONTENT)
}
