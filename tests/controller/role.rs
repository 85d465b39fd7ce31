//! Tests for the role landing pages.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use entity::sea_orm_active_enums::Role;
use libris::server::controller::role::{admin_view, librarian_view, member_view};

use super::*;

/// Expect the admin dashboard for a user whose profile role is Admin
#[tokio::test]
async fn admin_view_allows_admin_role() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_user("head").await?;
    test.user().set_role(user.id, Role::Admin).await?;
    log_in(&test, user.id).await;

    let result = admin_view(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/relationship/admin-view/"),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Admin Dashboard"));

    Ok(())
}

/// Expect a member to be sent to login with the admin page as `next`
#[tokio::test]
async fn admin_view_redirects_member() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_user("reader").await?;
    log_in(&test, user.id).await;

    let result = admin_view(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/relationship/admin-view/"),
    )
    .await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/?next=%2Frelationship%2Fadmin-view%2F");

    Ok(())
}

/// Expect staff status alone not to satisfy a role check
#[tokio::test]
async fn librarian_view_ignores_staff_flag() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_staff_user("clerk").await?;
    log_in(&test, user.id).await;

    let result = librarian_view(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/relationship/librarian-view/"),
    )
    .await;

    assert_eq!(
        result.unwrap_err().into_response().status(),
        StatusCode::SEE_OTHER
    );

    Ok(())
}

/// Expect the member page for a freshly created member
#[tokio::test]
async fn member_view_allows_member() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_user("reader").await?;
    log_in(&test, user.id).await;

    let result = member_view(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/relationship/member-view/"),
    )
    .await;

    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// Expect anonymous visitors to be redirected to login
#[tokio::test]
async fn member_view_redirects_anonymous() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let result = member_view(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/relationship/member-view/"),
    )
    .await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).starts_with("/login/"));

    Ok(())
}
