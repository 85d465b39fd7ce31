//! Staff admin pages.
//!
//! Every page requires an active staff account, anonymous visitors and non-staff users
//! are redirected to the login page. Book and user pages additionally need the matching
//! model permission and answer 403 without it.

pub mod user;

use axum::{
    extract::{Query, State},
    http::Uri,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::Permission;
use tower_sessions::Session;

use crate::server::{
    controller::util::{
        authorize::{require_staff, require_staff_permission},
        get_user::get_user_from_session,
        page::page_context,
    },
    data::book::BookFilter,
    error::Error,
    form::admin::AdminQuery,
    model::app::AppState,
    service::{book::BookService, catalog::CatalogService, user::UserService},
    view,
};

pub async fn index(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(user.as_ref(), &uri)?;

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::index(&ctx).into_response())
}

/// Bookshelf books, searchable by title and author, filterable by author and year
pub async fn books(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(query): Query<AdminQuery>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff_permission(user.as_ref(), Permission::ViewBook, &uri)?;

    let book_service = BookService::new(&state.db);
    let books = book_service
        .filter(&BookFilter {
            search: query.search(),
            author: query.author(),
            publication_year: query.publication_year(),
        })
        .await?;
    let (authors, years) = book_service.filter_choices().await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::books(&ctx, &query, &books, &authors, &years).into_response())
}

/// User profiles, filterable by role and searchable by username
pub async fn profiles(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(query): Query<AdminQuery>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(user.as_ref(), &uri)?;

    let profiles = UserService::new(&state.db)
        .profiles(query.role(), query.search().as_deref())
        .await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::profiles(&ctx, &query, &profiles).into_response())
}

pub async fn authors(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(query): Query<AdminQuery>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(user.as_ref(), &uri)?;

    let authors = CatalogService::new(&state.db)
        .authors(query.search().as_deref())
        .await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::authors(&ctx, &query, &authors).into_response())
}

/// Catalog books, searchable by title and author name, filterable by author
pub async fn catalog_books(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(query): Query<AdminQuery>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(user.as_ref(), &uri)?;

    let catalog_service = CatalogService::new(&state.db);
    let books = catalog_service
        .search_books(query.search().as_deref(), query.author_id())
        .await?;
    let authors = catalog_service.authors(None).await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::catalog_books(&ctx, &query, &books, &authors).into_response())
}

pub async fn libraries(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(query): Query<AdminQuery>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(user.as_ref(), &uri)?;

    let libraries = CatalogService::new(&state.db)
        .libraries(query.search().as_deref())
        .await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::libraries(&ctx, &query, &libraries).into_response())
}

pub async fn librarians(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(query): Query<AdminQuery>,
) -> Result<Response, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(user.as_ref(), &uri)?;

    let librarians = CatalogService::new(&state.db)
        .librarians(query.search().as_deref())
        .await?;

    let ctx = page_context(&session, user).await?;
    Ok(view::admin::librarians(&ctx, &query, &librarians).into_response())
}
