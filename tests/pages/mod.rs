//! Tests for how the assembled application answers errors on HTML routes.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use libris::server::{config::SecurityProfile, startup::build_app};
use libris_test_utils::prelude::*;
use tower::ServiceExt;

use crate::util::body_text;

async fn get(test: &TestContext, uri: &str) -> Response {
    build_app(test.db.clone(), SecurityProfile::from_debug(true))
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn is_html(resp: &Response) -> bool {
    resp.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"))
}

/// Expect an unknown library to render an HTML not found page
#[tokio::test]
async fn missing_library_renders_html_404() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;

    let resp = get(&test, "/relationship/library/404/").await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(is_html(&resp));
    assert!(body_text(resp).await.contains("404 Not Found"));

    Ok(())
}

/// Expect a permission failure on a book page to render an HTML forbidden page
#[tokio::test]
async fn book_detail_renders_html_403() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let book = test.book().insert_mock_book().await?;

    let resp = get(&test, &format!("/books/{}/", book.id)).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(is_html(&resp));
    assert!(body_text(resp)
        .await
        .contains("You do not have permission to view this page."));

    Ok(())
}

/// Expect login redirects on HTML routes to be left alone
#[tokio::test]
async fn admin_redirect_is_unchanged() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let resp = get(&test, "/admin/").await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/login/?next=%2Fadmin%2F"
    );

    Ok(())
}
