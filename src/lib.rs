//! Libris, a library catalog service.
//!
//! The `server` module holds the HTTP application (pages, admin and JSON API), `client`
//! holds the end-to-end API smoke test and `model` holds the JSON payloads shared by both.

pub mod client;
pub mod model;
pub mod server;
