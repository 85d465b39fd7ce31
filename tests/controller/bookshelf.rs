//! Tests for the permission gated bookshelf pages.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Form,
};
use entity::sea_orm_active_enums::Permission;
use libris::server::{
    controller::{
        bookshelf::{book_create, book_delete, book_list, book_search, form_example},
        util::csrf::{CsrfForm, CsrfOnly},
    },
    error::Error,
    form::{book::BookForm, example::ExampleForm, search::SearchForm},
    model::{app::AppState, session::flash::SessionFlash},
    service::book::BookService,
};

use super::*;

fn book_form(title: &str, author: &str, year: &str) -> BookForm {
    BookForm {
        title: title.to_string(),
        author: author.to_string(),
        publication_year: year.to_string(),
    }
}

/// Expect 403 for an anonymous visitor on the book list
#[tokio::test]
async fn list_forbidden_for_anonymous() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;

    let result = book_list(State(test.to_app_state()), test.session.clone()).await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 200 listing books once `can_view_book` is granted
#[tokio::test]
async fn list_shows_books_with_view_permission() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let user = test.user().insert_user("reader").await?;
    test.user().grant(user.id, Permission::ViewBook).await?;
    test.book().insert_mock_book().await?;
    log_in(&test, user.id).await;

    let result = book_list(State(test.to_app_state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("The Hobbit"));

    Ok(())
}

/// Expect a permission granted through a group to be honoured
#[tokio::test]
async fn list_allowed_through_group_permission() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let user = test.user().insert_user("viewer").await?;
    test.user()
        .add_to_new_group(user.id, "Viewers", &[Permission::ViewBook])
        .await?;
    log_in(&test, user.id).await;

    let result = book_list(State(test.to_app_state()), test.session.clone()).await;

    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// Expect 403 and the book left in place when deleting without `can_delete_book`
#[tokio::test]
async fn delete_forbidden_without_permission() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let user = test.user().insert_user("editor").await?;
    test.user().grant(user.id, Permission::EditBook).await?;
    let book = test.book().insert_mock_book().await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = book_delete(
        State(test.to_app_state()),
        test.session.clone(),
        Path(book.id),
        Form(CsrfOnly { csrf_token }),
    )
    .await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(BookService::new(&test.db).get(book.id).await.is_ok());

    Ok(())
}

/// Expect a redirect to the list, a flash message and the book removed
#[tokio::test]
async fn delete_removes_book_with_permission() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let user = test.user().insert_user("admin").await?;
    test.user().grant(user.id, Permission::DeleteBook).await?;
    let book = test.book().insert_mock_book().await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = book_delete(
        State(test.to_app_state()),
        test.session.clone(),
        Path(book.id),
        Form(CsrfOnly { csrf_token }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/books/");

    let flashes = SessionFlash::take(&test.session).await.unwrap();
    assert_eq!(flashes.len(), 1);
    assert_eq!(flashes[0].text, "Book \"The Hobbit\" deleted successfully!");

    let lookup = BookService::new(&test.db).get(book.id).await;
    assert!(matches!(lookup, Err(Error::NotFound(_))));

    Ok(())
}

/// Expect 403 when the submitted CSRF token does not match the session
#[tokio::test]
async fn delete_rejects_wrong_csrf_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let user = test.user().insert_superuser("root").await?;
    let book = test.book().insert_mock_book().await?;
    log_in(&test, user.id).await;
    csrf_token(&test).await;

    let result = book_delete(
        State(test.to_app_state()),
        test.session.clone(),
        Path(book.id),
        Form(CsrfOnly {
            csrf_token: "forged".to_string(),
        }),
    )
    .await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(BookService::new(&test.db).get(book.id).await.is_ok());

    Ok(())
}

/// Expect the form to be shown again and nothing saved for an out of range year
#[tokio::test]
async fn create_rerenders_on_invalid_year() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let user = test.user().insert_user("creator").await?;
    test.user().grant(user.id, Permission::CreateBook).await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = book_create(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: book_form("Dune", "Frank Herbert", "2999"),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(BookService::new(&test.db).list().await.unwrap().is_empty());

    Ok(())
}

/// Expect a redirect to the new book's detail page
#[tokio::test]
async fn create_redirects_to_detail() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let user = test.user().insert_user("creator").await?;
    test.user().grant(user.id, Permission::CreateBook).await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = book_create(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: book_form("  Dune ", "Frank Herbert", "1965"),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let books = BookService::new(&test.db).list().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(location(&resp), format!("/books/{}/", books[0].id));

    Ok(())
}

/// Expect an anonymous search to redirect to login carrying the search URL
#[tokio::test]
async fn search_requires_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;

    let result = book_search(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/books/search/?q=hobbit"),
        Query(SearchForm {
            q: Some("hobbit".to_string()),
        }),
    )
    .await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).starts_with("/login/?next="));

    Ok(())
}

/// Expect matching titles for a logged in user without any book permission
#[tokio::test]
async fn search_finds_titles_for_logged_in_user() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Book)
        .build()
        .await?;
    let user = test.user().insert_user("member").await?;
    test.book().insert_mock_book().await?;
    test.book().insert_book("Dune", "Frank Herbert", 1965).await?;
    log_in(&test, user.id).await;

    let result = book_search(
        State(test.to_app_state()),
        test.session.clone(),
        Uri::from_static("/books/search/?q=hob"),
        Query(SearchForm {
            q: Some("hob".to_string()),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("The Hobbit"));
    assert!(!body.contains("Dune"));

    Ok(())
}

/// Expect a valid contact form to redirect back with a thank you flash
#[tokio::test]
async fn form_example_redirects_with_thank_you() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let csrf_token = csrf_token(&test).await;

    let result = form_example(
        State::<AppState>(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: ExampleForm {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                message: "Do you stock first editions?".to_string(),
            },
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/form-example/");

    let flashes = SessionFlash::take(&test.session).await.unwrap();
    assert!(flashes[0].text.starts_with("Thank you Ada!"));

    Ok(())
}

/// Expect a short message to keep the visitor on the form
#[tokio::test]
async fn form_example_rerenders_on_short_message() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let csrf_token = csrf_token(&test).await;

    let result = form_example(
        State::<AppState>(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: ExampleForm {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                message: "Hi".to_string(),
            },
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(SessionFlash::take(&test.session).await.unwrap().is_empty());

    Ok(())
}
