//! Catalog repositories: authors, their books, libraries and librarians.

pub mod author;
pub mod book;
pub mod librarian;
pub mod library;
