//! HTTP routing and OpenAPI documentation configuration.
//!
//! Page routes are plain axum routes. API routes are registered through utoipa's
//! `OpenApiRouter` so their annotations are collected into one OpenAPI document, served
//! as JSON at `/api/docs/openapi.json`.

use axum::{middleware, routing::get, Json, Router};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{controller, model::app::AppState};

pub static OPENAPI_PATH: &str = "/api/docs/openapi.json";

/// Registers the `Authorization: Token <key>` scheme referenced by the API paths
struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token <key>, obtained from /api/auth/token/",
            ))),
        );
    }
}

/// Builds the application's HTTP router.
///
/// # Registered Endpoints
/// - Bookshelf pages under `/books/`, the home page and `/form-example/`
/// - Session authentication: `/login/`, `/logout/`, `/register/`
/// - Catalog pages and role views under `/relationship/`
/// - Staff admin pages under `/admin/`
/// - JSON API under `/api/` and its OpenAPI document
///
/// Errors from page and admin routes are rendered as HTML, API errors stay JSON.
///
/// # Returns
/// A `Router<AppState>` without session or security layers, see
/// [`crate::server::startup::build_app`] for the fully layered application.
pub fn routes() -> Router<AppState> {
    let html_routes = page_routes()
        .merge(admin_routes())
        .layer(middleware::map_response(controller::util::page::html_error_page));

    api_routes().merge(html_routes)
}

fn page_routes() -> Router<AppState> {
    use controller::{auth, bookshelf, catalog, role};

    Router::new()
        .route("/", get(bookshelf::home))
        .route("/books/", get(bookshelf::book_list))
        .route(
            "/books/create/",
            get(bookshelf::book_create_page).post(bookshelf::book_create),
        )
        .route("/books/search/", get(bookshelf::book_search))
        .route("/books/{id}/", get(bookshelf::book_detail))
        .route(
            "/books/{id}/edit/",
            get(bookshelf::book_edit_page).post(bookshelf::book_edit),
        )
        .route(
            "/books/{id}/delete/",
            get(bookshelf::book_delete_page).post(bookshelf::book_delete),
        )
        .route(
            "/form-example/",
            get(bookshelf::form_example_page).post(bookshelf::form_example),
        )
        .route("/login/", get(auth::login_page).post(auth::login))
        .route("/logout/", get(auth::logout_page).post(auth::logout))
        .route("/register/", get(auth::register_page).post(auth::register))
        .route("/relationship/books/", get(catalog::list_books))
        .route("/relationship/library/", get(catalog::first_library))
        .route("/relationship/library/{id}/", get(catalog::library_detail))
        .route(
            "/relationship/add_book/",
            get(catalog::add_book_page).post(catalog::add_book),
        )
        .route(
            "/relationship/edit_book/{id}/",
            get(catalog::edit_book_page).post(catalog::edit_book),
        )
        .route(
            "/relationship/delete_book/{id}/",
            get(catalog::delete_book_page).post(catalog::delete_book),
        )
        .route("/relationship/admin-view/", get(role::admin_view))
        .route("/relationship/librarian-view/", get(role::librarian_view))
        .route("/relationship/member-view/", get(role::member_view))
}

fn admin_routes() -> Router<AppState> {
    use controller::admin;

    Router::new()
        .route("/admin/", get(admin::index))
        .route("/admin/books/", get(admin::books))
        .route("/admin/users/", get(admin::user::list))
        .route(
            "/admin/users/add/",
            get(admin::user::add_page).post(admin::user::add),
        )
        .route(
            "/admin/users/{id}/change/",
            get(admin::user::change_page).post(admin::user::change),
        )
        .route(
            "/admin/users/{id}/delete/",
            get(admin::user::delete_page).post(admin::user::delete),
        )
        .route("/admin/profiles/", get(admin::profiles))
        .route("/admin/authors/", get(admin::authors))
        .route("/admin/catalog-books/", get(admin::catalog_books))
        .route("/admin/libraries/", get(admin::libraries))
        .route("/admin/librarians/", get(admin::librarians))
}

fn api_routes() -> Router<AppState> {
    use controller::api::{book, token};

    #[derive(OpenApi)]
    #[openapi(
        info(title = "Libris", description = "Libris book API"),
        modifiers(&TokenSecurity),
        tags(
            (name = book::BOOK_TAG, description = "Book API routes"),
            (name = token::AUTH_TAG, description = "API token routes"),
        )
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(book::list_books))
        .routes(routes!(book::list_all_books, book::create_book))
        .routes(routes!(
            book::get_book,
            book::update_book,
            book::partial_update_book,
            book::delete_book
        ))
        .routes(routes!(token::obtain_token))
        .split_for_parts();

    routes.route(OPENAPI_PATH, get(move || async move { Json(api) }))
}
