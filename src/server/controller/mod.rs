//! HTTP controllers for the Libris pages, admin and JSON API.
//!
//! Page handlers load the request user from the session, check authorization, call into
//! services and render maud views. API handlers authenticate with a token and exchange
//! JSON, their OpenAPI description comes from the utoipa annotations.

pub mod admin;
pub mod api;
pub mod auth;
pub mod bookshelf;
pub mod catalog;
pub mod role;
pub mod util;
