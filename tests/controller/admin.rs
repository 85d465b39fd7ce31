//! Tests for the staff admin pages.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Form,
};
use entity::sea_orm_active_enums::{Permission, Role};
use libris::server::{
    controller::{
        admin::{self, user},
        util::csrf::{CsrfForm, CsrfOnly},
    },
    form::{admin::AdminQuery, user::UserChangeForm},
    service::user::UserService,
};

use super::*;

/// Expect anonymous visitors to be sent to login
#[tokio::test]
async fn index_redirects_anonymous() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let result = admin::index(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/"),
    )
    .await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/?next=%2Fadmin%2F");

    Ok(())
}

/// Expect a logged in non-staff user to be redirected like an anonymous one
#[tokio::test]
async fn index_redirects_non_staff() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let member = test.user().insert_user("member").await?;
    test.user().grant(member.id, Permission::ViewUser).await?;
    log_in(&test, member.id).await;

    let result = admin::index(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/"),
    )
    .await;

    assert_eq!(
        result.unwrap_err().into_response().status(),
        StatusCode::SEE_OTHER
    );

    Ok(())
}

/// Expect staff to see only the sections their permissions allow
#[tokio::test]
async fn index_lists_permitted_sections() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let staff = test.user().insert_staff_user("clerk").await?;
    test.user().grant(staff.id, Permission::ViewBook).await?;
    log_in(&test, staff.id).await;

    let result = admin::index(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/"),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("/admin/books/"));
    assert!(!body.contains("/admin/users/"));

    Ok(())
}

/// Expect 403 for staff lacking the user view permission
#[tokio::test]
async fn user_list_forbidden_without_permission() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let staff = test.user().insert_staff_user("clerk").await?;
    log_in(&test, staff.id).await;

    let result = user::list(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/users/"),
        Query(AdminQuery::default()),
    )
    .await;

    assert_eq!(
        result.unwrap_err().into_response().status(),
        StatusCode::FORBIDDEN
    );

    Ok(())
}

/// Expect the user changelist to honour the search box
#[tokio::test]
async fn user_list_filters_by_search() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let staff = test.user().insert_staff_user("clerk").await?;
    test.user().grant(staff.id, Permission::ViewUser).await?;
    test.user().insert_user("bookworm").await?;
    test.user().insert_user("novelist").await?;
    log_in(&test, staff.id).await;

    let result = user::list(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/users/?q=worm"),
        Query(AdminQuery {
            q: Some("worm".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("bookworm"));
    assert!(!body.contains("novelist"));

    Ok(())
}

/// Expect the book changelist to filter by author
#[tokio::test]
async fn book_list_filters_by_author() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let staff = test.user().insert_superuser("root").await?;
    test.book().insert_mock_book().await?;
    test.book().insert_book("Dune", "Frank Herbert", 1965).await?;
    log_in(&test, staff.id).await;

    let result = admin::books(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/books/?author=Frank+Herbert"),
        Query(AdminQuery {
            author: Some("Frank Herbert".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Dune"));
    assert!(!body.contains("The Hobbit"));

    Ok(())
}

/// Expect a change to update flags and the profile role
#[tokio::test]
async fn user_change_updates_role_and_flags() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let staff = test.user().insert_staff_user("clerk").await?;
    test.user().grant(staff.id, Permission::EditUser).await?;
    let target = test.user().insert_user("promoted").await?;
    log_in(&test, staff.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = user::change(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/users/2/change/"),
        Path(target.id),
        Form(CsrfForm {
            csrf_token,
            data: UserChangeForm {
                email: "promoted@example.com".to_string(),
                is_active: Some("on".to_string()),
                is_staff: Some("on".to_string()),
                role: "Librarian".to_string(),
                ..Default::default()
            },
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/users/");

    let (user, role) = UserService::new(&test.db)
        .get_user(target.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.is_staff);
    assert!(user.is_active);
    assert_eq!(role, Some(Role::Librarian));

    Ok(())
}

/// Expect an unknown role to keep the admin on the change form
#[tokio::test]
async fn user_change_rejects_unknown_role() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let staff = test.user().insert_superuser("root").await?;
    let target = test.user().insert_user("reader").await?;
    log_in(&test, staff.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = user::change(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/users/2/change/"),
        Path(target.id),
        Form(CsrfForm {
            csrf_token,
            data: UserChangeForm {
                is_active: Some("on".to_string()),
                role: "Overlord".to_string(),
                ..Default::default()
            },
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Select a valid choice."));

    let (_, role) = UserService::new(&test.db)
        .get_user(target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(role, Some(Role::Member));

    Ok(())
}

/// Expect delete to remove the account
#[tokio::test]
async fn user_delete_removes_account() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let staff = test.user().insert_superuser("root").await?;
    let target = test.user().insert_user("leaving").await?;
    log_in(&test, staff.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = user::delete(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/users/2/delete/"),
        Path(target.id),
        Form(CsrfOnly { csrf_token }),
    )
    .await;

    assert_eq!(
        result.unwrap().into_response().status(),
        StatusCode::SEE_OTHER
    );
    assert!(UserService::new(&test.db)
        .get_user(target.id)
        .await
        .unwrap()
        .is_none());

    Ok(())
}

/// Expect 404 when deleting a user that does not exist
#[tokio::test]
async fn user_delete_unknown_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let staff = test.user().insert_superuser("root").await?;
    log_in(&test, staff.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = user::delete(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/admin/users/99/delete/"),
        Path(99),
        Form(CsrfOnly { csrf_token }),
    )
    .await;

    assert_eq!(
        result.unwrap_err().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}
