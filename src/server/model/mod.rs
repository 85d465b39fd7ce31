//! Server application models and type definitions.
//!
//! Application state, database model aliases, the authenticated user with its
//! authorization policy, typed session data and account inputs.

pub mod app;
pub mod auth;
pub mod db;
pub mod session;
pub mod user;
