//! Helpers shared by the page and API controllers.
//!
//! Loading the request user from the session, authorization guards, CSRF validation of
//! submitted forms and building the per-page render context.

pub mod authorize;
pub mod csrf;
pub mod get_user;
pub mod page;
