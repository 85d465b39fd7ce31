//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main libris crate so fixtures and tests read
//! the same way.

pub type UserModel = entity::custom_user::Model;
pub type UserProfileModel = entity::user_profile::Model;
pub type AuthTokenModel = entity::auth_token::Model;
pub type BookModel = entity::book::Model;
pub type ApiBookModel = entity::api_book::Model;
pub type AuthorModel = entity::author::Model;
pub type CatalogBookModel = entity::catalog_book::Model;
pub type LibraryModel = entity::library::Model;
pub type LibrarianModel = entity::librarian::Model;
