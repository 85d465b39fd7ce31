//! Utility functions and helpers for server operations.
//!
//! Password hashing, random token generation, redirect target sanitizing and date
//! arithmetic shared by services and controllers.

pub mod password;
pub mod redirect;
pub mod time;
pub mod token;
