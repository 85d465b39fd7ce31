//! Tests for the token authenticated JSON API, driven through the assembled application.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use libris::{
    model::{api::TokenDto, book::ApiBookDto},
    server::{config::SecurityProfile, router::OPENAPI_PATH, startup::build_app},
};
use libris_test_utils::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::util::body_text;

async fn api_test() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_default_user()
        .with_table(entity::prelude::ApiBook)
        .build()
        .await
}

fn app(test: &TestContext) -> Router {
    build_app(test.db.clone(), SecurityProfile::from_debug(true))
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Token {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn token_for(test: &TestContext) -> String {
    let user = test.user().insert_user("apiuser").await.unwrap();
    test.user().insert_token(user.id).await.unwrap().key
}

/// Expect 401 with a `WWW-Authenticate: Token` challenge without credentials
#[tokio::test]
async fn list_requires_token() -> Result<(), TestError> {
    let test = api_test().await?;

    let resp = app(&test)
        .oneshot(request(Method::GET, "/api/books/", None, None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Token");

    Ok(())
}

/// Expect 401 for a token that does not exist
#[tokio::test]
async fn list_rejects_unknown_token() -> Result<(), TestError> {
    let test = api_test().await?;

    let resp = app(&test)
        .oneshot(request(Method::GET, "/api/books_all/", Some("deadbeef"), None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the same token for repeated logins and 400 for a wrong password
#[tokio::test]
async fn obtain_token_is_stable() -> Result<(), TestError> {
    let test = api_test().await?;
    let credentials = json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD });

    let first = app(&test)
        .oneshot(request(Method::POST, "/api/auth/token/", None, Some(credentials.clone())))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first: TokenDto = serde_json::from_str(&body_text(first).await).unwrap();

    let second = app(&test)
        .oneshot(request(Method::POST, "/api/auth/token/", None, Some(credentials)))
        .await
        .unwrap();
    let second: TokenDto = serde_json::from_str(&body_text(second).await).unwrap();
    assert_eq!(first.token, second.token);

    let wrong = json!({ "username": TEST_USERNAME, "password": "nope" });
    let resp = app(&test)
        .oneshot(request(Method::POST, "/api/auth/token/", None, Some(wrong)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect create, read, replace, patch and delete to work end to end
#[tokio::test]
async fn book_crud_round_trip() -> Result<(), TestError> {
    let test = api_test().await?;
    let token = token_for(&test).await;
    let token = Some(token.as_str());

    let resp = app(&test)
        .oneshot(request(
            Method::POST,
            "/api/books_all/",
            token,
            Some(json!({ "title": "Test Book", "author": "Test Author" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ApiBookDto = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(created.title, "Test Book");

    let detail = format!("/api/books_all/{}/", created.id);

    let resp = app(&test)
        .oneshot(request(Method::GET, &detail, token, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: ApiBookDto = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(fetched, created);

    let resp = app(&test)
        .oneshot(request(
            Method::PUT,
            &detail,
            token,
            Some(json!({ "title": "Updated Test Book", "author": "Test Author" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let replaced: ApiBookDto = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(replaced.title, "Updated Test Book");
    assert_eq!(replaced.created_at, created.created_at);

    let resp = app(&test)
        .oneshot(request(
            Method::PATCH,
            &detail,
            token,
            Some(json!({ "author": "Another Author" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let patched: ApiBookDto = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(patched.title, "Updated Test Book");
    assert_eq!(patched.author, "Another Author");

    let resp = app(&test)
        .oneshot(request(Method::DELETE, &detail, token, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app(&test)
        .oneshot(request(Method::GET, &detail, token, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect both list endpoints to return every book
#[tokio::test]
async fn list_endpoints_return_all_books() -> Result<(), TestError> {
    let test = api_test().await?;
    let token = token_for(&test).await;
    test.api().insert_api_book("First", "Author A").await?;
    test.api().insert_api_book("Second", "Author B").await?;

    for path in ["/api/books/", "/api/books_all/"] {
        let resp = app(&test)
            .oneshot(request(Method::GET, path, Some(&token), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let books: Vec<ApiBookDto> = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(books.len(), 2);
    }

    Ok(())
}

/// Expect 400 naming the missing field when creating without an author
#[tokio::test]
async fn create_rejects_missing_author() -> Result<(), TestError> {
    let test = api_test().await?;
    let token = token_for(&test).await;

    let resp = app(&test)
        .oneshot(request(
            Method::POST,
            "/api/books_all/",
            Some(&token),
            Some(json!({ "title": "Orphan" })),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("author"));

    Ok(())
}

/// Expect 400 with a message under the offending field for a wrongly typed value
#[tokio::test]
async fn create_rejects_wrongly_typed_field() -> Result<(), TestError> {
    let test = api_test().await?;
    let token = token_for(&test).await;

    let resp = app(&test)
        .oneshot(request(
            Method::POST,
            "/api/books_all/",
            Some(&token),
            Some(json!({ "title": true, "author": "Frank Herbert" })),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_text(resp).await).unwrap();
    assert!(body["title"].as_array().is_some_and(|messages| !messages.is_empty()));
    assert!(body.get("author").is_none());

    Ok(())
}

/// Expect 400 with a JSON error body for a body that is not valid JSON
#[tokio::test]
async fn patch_rejects_malformed_json() -> Result<(), TestError> {
    let test = api_test().await?;
    let token = token_for(&test).await;
    let book = test.api().insert_api_book("Dune", "Frank Herbert").await?;

    let req = Request::builder()
        .method(Method::PATCH)
        .uri(format!("/api/books_all/{}/", book.id))
        .header(header::AUTHORIZATION, format!("Token {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let resp = app(&test).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_text(resp).await).unwrap();
    assert!(body["error"].as_str().is_some_and(|e| e.starts_with("JSON parse error")));

    Ok(())
}

/// Expect 415 when the body is not declared as JSON
#[tokio::test]
async fn create_requires_json_content_type() -> Result<(), TestError> {
    let test = api_test().await?;
    let token = token_for(&test).await;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/books_all/")
        .header(header::AUTHORIZATION, format!("Token {}", token))
        .body(Body::from("title=Dune&author=Frank+Herbert"))
        .unwrap();
    let resp = app(&test).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    Ok(())
}

/// Expect 404 for updates to a book that does not exist
#[tokio::test]
async fn update_unknown_book_not_found() -> Result<(), TestError> {
    let test = api_test().await?;
    let token = token_for(&test).await;

    let resp = app(&test)
        .oneshot(request(
            Method::PUT,
            "/api/books_all/999/",
            Some(&token),
            Some(json!({ "title": "Ghost", "author": "Nobody" })),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    Ok(())
}

/// Expect the OpenAPI document to describe the token scheme without authentication
#[tokio::test]
async fn openapi_document_is_public() -> Result<(), TestError> {
    let test = api_test().await?;

    let resp = app(&test)
        .oneshot(request(Method::GET, OPENAPI_PATH, None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let doc: Value = serde_json::from_str(&body_text(resp).await).unwrap();
    assert!(doc["paths"]["/api/books_all/{id}/"].is_object());
    assert!(doc["components"]["securitySchemes"]["token"].is_object());

    Ok(())
}

/// Expect the security headers on every response
#[tokio::test]
async fn responses_carry_security_headers() -> Result<(), TestError> {
    let test = api_test().await?;

    let resp = app(&test)
        .oneshot(request(Method::GET, "/api/books/", None, None))
        .await
        .unwrap();

    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
    assert_eq!(resp.headers().get("x-content-type-options").unwrap(), "nosniff");

    Ok(())
}
