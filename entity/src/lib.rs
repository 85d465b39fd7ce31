//! SeaORM entities for the Libris database schema.
//!
//! Tables are grouped the way the application areas are: user accounts and their access
//! control records, the bookshelf book table, the catalog (authors, books, libraries and
//! librarians) and the API book table.

pub mod prelude;

pub mod api_book;
pub mod auth_group;
pub mod auth_token;
pub mod author;
pub mod book;
pub mod catalog_book;
pub mod custom_user;
pub mod group_permission;
pub mod librarian;
pub mod library;
pub mod library_book;
pub mod sea_orm_active_enums;
pub mod user_group;
pub mod user_permission;
pub mod user_profile;
