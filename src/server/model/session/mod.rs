//! Session data models and utilities.
//!
//! Type-safe wrappers for values stored in the session: the logged in user ID, the
//! per-session CSRF token and one-shot flash messages. Keys are namespaced under
//! `libris:` to avoid collisions. [`store::SessionMemoryStore`] holds the records.

pub mod csrf;
pub mod flash;
pub mod user;
pub mod store;
