//! JSON payloads shared between the server and the API client.

pub mod api;
pub mod book;
