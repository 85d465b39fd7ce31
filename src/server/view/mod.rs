//! Server rendered HTML pages built with `maud`.
//!
//! Views are pure functions from data to [`maud::Markup`]. Every page is wrapped by
//! [`layout::page`], which renders navigation, queued flash messages and the current
//! user. Values are escaped by `maud`, so nothing here builds raw HTML strings.

pub mod admin;
pub mod auth;
pub mod bookshelf;
pub mod catalog;
pub mod error;
pub mod layout;
pub mod role;
