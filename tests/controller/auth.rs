//! Tests for login, registration and logout.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Form};
use entity::sea_orm_active_enums::Role;
use libris::server::{
    controller::{
        auth::{login, logout, register},
        util::csrf::{CsrfForm, CsrfOnly},
    },
    form::user::{LoginForm, UserCreationForm},
    model::session::{csrf::SessionCsrfToken, flash::SessionFlash, user::SessionUserId},
    service::user::UserService,
};

use super::*;

const NEW_PASSWORD: &str = "Quiet-Lantern-4821";

fn login_form(username: &str, password: &str, next: Option<&str>) -> LoginForm {
    LoginForm {
        username: username.to_string(),
        password: password.to_string(),
        next: next.map(str::to_string),
    }
}

fn registration(username: &str) -> UserCreationForm {
    UserCreationForm {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password1: NEW_PASSWORD.to_string(),
        password2: NEW_PASSWORD.to_string(),
        ..Default::default()
    }
}

/// Expect a redirect to `next`, the user stored in the session and last login recorded
#[tokio::test]
async fn login_redirects_to_next() -> Result<(), TestError> {
    let test = TestBuilder::new().with_default_user().build().await?;
    let csrf_token = csrf_token(&test).await;

    let result = login(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token: csrf_token.clone(),
            data: login_form(TEST_USERNAME, TEST_PASSWORD, Some("/books/")),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/books/");

    let user_id = SessionUserId::get(&test.session).await.unwrap().unwrap();
    let (user, _) = UserService::new(&test.db)
        .get_user(user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.username, TEST_USERNAME);
    assert!(user.last_login.is_some());

    let rotated = SessionCsrfToken::get(&test.session).await.unwrap();
    assert_ne!(rotated, Some(csrf_token));

    Ok(())
}

/// Expect an off-site `next` to be replaced with the home page
#[tokio::test]
async fn login_ignores_external_next() -> Result<(), TestError> {
    let test = TestBuilder::new().with_default_user().build().await?;
    let csrf_token = csrf_token(&test).await;

    let result = login(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: login_form(TEST_USERNAME, TEST_PASSWORD, Some("//evil.example/")),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(location(&resp), "/");

    Ok(())
}

/// Expect the form again with no session user for a wrong password
#[tokio::test]
async fn login_rejects_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_default_user().build().await?;
    let csrf_token = csrf_token(&test).await;

    let result = login(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: login_form(TEST_USERNAME, "not-the-password", None),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Please enter a correct username"));
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect an inactive account to be refused even with the right password
#[tokio::test]
async fn login_rejects_inactive_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    test.user().insert_inactive_user("dormant").await?;
    let csrf_token = csrf_token(&test).await;

    let result = login(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: login_form("dormant", TEST_PASSWORD, None),
        }),
    )
    .await;

    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 403 when the form carries no CSRF token
#[tokio::test]
async fn login_requires_csrf_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_default_user().build().await?;
    csrf_token(&test).await;

    let result = login(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token: String::new(),
            data: login_form(TEST_USERNAME, TEST_PASSWORD, None),
        }),
    )
    .await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect a member account, a logged in session and a redirect home
#[tokio::test]
async fn register_creates_member_and_logs_in() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let csrf_token = csrf_token(&test).await;

    let result = register(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: registration("newreader"),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let user_id = SessionUserId::get(&test.session).await.unwrap().unwrap();
    let (user, role) = UserService::new(&test.db)
        .get_user(user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.username, "newreader");
    assert!(!user.is_staff);
    assert_eq!(role, Some(Role::Member));

    let flashes = SessionFlash::take(&test.session).await.unwrap();
    assert_eq!(flashes[0].text, "Registration successful!");

    Ok(())
}

/// Expect a taken username to be reported on the form instead of failing
#[tokio::test]
async fn register_reports_taken_username() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user("bookworm").build().await?;
    let csrf_token = csrf_token(&test).await;

    let result = register(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: registration("bookworm"),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp)
        .await
        .contains("A user with that username already exists."));
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect mismatched passwords to keep the visitor on the form
#[tokio::test]
async fn register_rejects_mismatched_passwords() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let csrf_token = csrf_token(&test).await;

    let mut form = registration("newreader");
    form.password2 = "Different-Lantern-4821".to_string();

    let result = register(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: form,
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Passwords don"));

    Ok(())
}

/// Expect logout to clear the session user
#[tokio::test]
async fn logout_flushes_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_default_user().build().await?;
    let user = test.user().insert_user("leaving").await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = logout(test.session.clone(), Form(CsrfOnly { csrf_token })).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect logout without a valid token to leave the user logged in
#[tokio::test]
async fn logout_requires_csrf_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_user("staying").await?;
    log_in(&test, user.id).await;
    csrf_token(&test).await;

    let result = logout(
        test.session.clone(),
        Form(CsrfOnly {
            csrf_token: "stale".to_string(),
        }),
    )
    .await;

    assert_eq!(
        result.unwrap_err().into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));

    Ok(())
}
