//! Tests for the HTML page controllers.
//!
//! Handlers are called directly with the test session, so session state written by one
//! call (user id, CSRF token, flashes) is visible to the next.

mod admin;
mod auth;
mod bookshelf;
mod catalog;
mod role;

use libris_test_utils::prelude::*;

use crate::util::{body_text, csrf_token, location, log_in};
