//! Test fixture modules for database record creation.
//!
//! Each submodule hangs a fixture accessor off [`TestContext`](crate::TestContext):
//!
//! - `user` - accounts, profiles, permissions, groups and API tokens
//! - `book` - bookshelf books
//! - `catalog` - authors, catalog books, libraries and librarians
//! - `api` - API books

pub mod api;
pub mod book;
pub mod catalog;
pub mod user;
