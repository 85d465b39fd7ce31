//! Database model type aliases.
//!
//! Short names for the `entity` crate models used across repositories, services and views.

/// Account with credentials, flags and personal details.
pub type UserModel = entity::custom_user::Model;

/// Role attached one-to-one to a user.
pub type UserProfileModel = entity::user_profile::Model;

/// API token, one per user.
pub type AuthTokenModel = entity::auth_token::Model;

pub type GroupModel = entity::auth_group::Model;

/// Bookshelf book with a free text author.
pub type BookModel = entity::book::Model;

/// Book managed through the JSON API.
pub type ApiBookModel = entity::api_book::Model;

pub type AuthorModel = entity::author::Model;

/// Catalog book linked to an [`AuthorModel`].
pub type CatalogBookModel = entity::catalog_book::Model;

pub type LibraryModel = entity::library::Model;

pub type LibrarianModel = entity::librarian::Model;
