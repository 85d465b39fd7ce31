//! Server application core modules.
//!
//! Everything behind the HTTP interface: configuration, routing and security layers,
//! controllers rendering maud views or JSON, form validation, services holding the
//! business rules and repositories over the `entity` models.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod form;
pub mod model;
pub mod router;
pub mod security;
pub mod service;
pub mod startup;
pub mod util;
pub mod view;
