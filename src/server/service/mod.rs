//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that implements business logic and
//! coordinates between repositories. Services cover authentication and API tokens,
//! user accounts and groups, bookshelf and API books, and the catalog.

pub mod api_book;
pub mod auth;
pub mod book;
pub mod catalog;
pub mod group;
pub mod token;
pub mod user;
