//! Shared helpers for driving handlers and routers in integration tests.

use axum::{
    body::{to_bytes, Body},
    http::{header, Response},
};
use libris::server::model::session::{csrf::SessionCsrfToken, user::SessionUserId};
use libris_test_utils::prelude::*;

/// Store `user_id` in the test session, as a completed login would.
pub async fn log_in(test: &TestContext, user_id: i32) {
    SessionUserId::insert(&test.session, user_id).await.unwrap();
}

/// CSRF token for the test session, created on first use.
pub async fn csrf_token(test: &TestContext) -> String {
    SessionCsrfToken::get_or_create(&test.session).await.unwrap()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
