//! Tests for the author / library catalog pages.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Form,
};
use entity::sea_orm_active_enums::Permission;
use libris::server::{
    controller::{
        catalog::{add_book, delete_book, edit_book, first_library, library_detail, list_books},
        util::csrf::{CsrfForm, CsrfOnly},
    },
    form::catalog::CatalogBookForm,
    model::session::flash::SessionFlash,
    service::catalog::CatalogService,
};

use super::*;

fn catalog_form(title: &str, author: &str) -> CatalogBookForm {
    CatalogBookForm {
        title: title.to_string(),
        author: author.to_string(),
    }
}

/// Expect the public book list to show each book with its author
#[tokio::test]
async fn list_shows_books_with_authors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let author = test.catalog().insert_author("Ursula K. Le Guin").await?;
    test.catalog().insert_book("A Wizard of Earthsea", author.id).await?;

    let result = list_books(State(test.to_app_state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("A Wizard of Earthsea"));
    assert!(body.contains("Ursula K. Le Guin"));

    Ok(())
}

/// Expect the first library page to cope with an empty catalog
#[tokio::test]
async fn first_library_without_libraries() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;

    let result = first_library(State(test.to_app_state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("No library found."));

    Ok(())
}

/// Expect a library page listing its books and librarian
#[tokio::test]
async fn library_detail_lists_collection() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let author = test.catalog().insert_author("Octavia E. Butler").await?;
    let book = test.catalog().insert_book("Kindred", author.id).await?;
    let library = test.catalog().insert_library("Central Library").await?;
    test.catalog().add_to_library(library.id, book.id).await?;
    test.catalog()
        .insert_librarian("Grace Hopper", library.id)
        .await?;

    let result = library_detail(
        State(test.to_app_state()),
        test.session.clone(),
        Path(library.id),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Central Library"));
    assert!(body.contains("Kindred"));
    assert!(body.contains("Grace Hopper"));

    Ok(())
}

/// Expect 404 for an unknown library id
#[tokio::test]
async fn library_detail_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;

    let result = library_detail(
        State(test.to_app_state()),
        test.session.clone(),
        Path(404),
    )
    .await;

    assert_eq!(
        result.unwrap_err().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect 403 when adding a book without `can_add_book`
#[tokio::test]
async fn add_book_forbidden_without_permission() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let user = test.user().insert_user("member").await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = add_book(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: catalog_form("Kindred", "Octavia E. Butler"),
        }),
    )
    .await;

    assert_eq!(
        result.unwrap_err().into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert!(CatalogService::new(&test.db).list_books().await.unwrap().is_empty());

    Ok(())
}

/// Expect a new author to be created alongside the book
#[tokio::test]
async fn add_book_creates_author() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let user = test.user().insert_user("librarian").await?;
    test.user().grant(user.id, Permission::AddCatalogBook).await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = add_book(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: catalog_form("Kindred", "Octavia E. Butler"),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/relationship/books/");

    let books = CatalogService::new(&test.db).list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    let (book, author) = &books[0];
    assert_eq!(book.title, "Kindred");
    assert_eq!(author.as_ref().map(|a| a.name.as_str()), Some("Octavia E. Butler"));

    Ok(())
}

/// Expect an existing author to be reused rather than duplicated
#[tokio::test]
async fn add_book_reuses_existing_author() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let user = test.user().insert_superuser("root").await?;
    let author = test.catalog().insert_author("Octavia E. Butler").await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    add_book(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: catalog_form("Parable of the Sower", "Octavia E. Butler"),
        }),
    )
    .await
    .unwrap();

    let authors = CatalogService::new(&test.db).authors(None).await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].id, author.id);

    Ok(())
}

/// Expect a missing author to produce an error flash and no book
#[tokio::test]
async fn add_book_flashes_missing_author() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let user = test.user().insert_superuser("root").await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = add_book(
        State(test.to_app_state()),
        test.session.clone(),
        Form(CsrfForm {
            csrf_token,
            data: catalog_form("Kindred", "   "),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp)
        .await
        .contains("Please provide both title and author."));
    assert!(CatalogService::new(&test.db).list_books().await.unwrap().is_empty());

    Ok(())
}

/// Expect editing an unknown book to redirect to the list with an error flash
#[tokio::test]
async fn edit_missing_book_redirects_with_flash() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let user = test.user().insert_user("editor").await?;
    test.user()
        .grant(user.id, Permission::ChangeCatalogBook)
        .await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = edit_book(
        State(test.to_app_state()),
        test.session.clone(),
        Path(99),
        Form(CsrfForm {
            csrf_token,
            data: catalog_form("Kindred", "Octavia E. Butler"),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/relationship/books/");

    let flashes = SessionFlash::take(&test.session).await.unwrap();
    assert_eq!(flashes[0].text, "Book not found.");

    Ok(())
}

/// Expect an edit to retitle the book and move it to a new author
#[tokio::test]
async fn edit_book_changes_title_and_author() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let user = test.user().insert_superuser("root").await?;
    let author = test.catalog().insert_author("Unknown").await?;
    let book = test.catalog().insert_book("Kindrid", author.id).await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = edit_book(
        State(test.to_app_state()),
        test.session.clone(),
        Path(book.id),
        Form(CsrfForm {
            csrf_token,
            data: catalog_form("Kindred", "Octavia E. Butler"),
        }),
    )
    .await;

    assert_eq!(
        result.unwrap().into_response().status(),
        StatusCode::SEE_OTHER
    );

    let (book, author) = CatalogService::new(&test.db)
        .get_book(book.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(book.title, "Kindred");
    assert_eq!(author.map(|a| a.name), Some("Octavia E. Butler".to_string()));

    Ok(())
}

/// Expect delete to remove the book with `can_delete_book`
#[tokio::test]
async fn delete_book_with_permission() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_catalog_tables()
        .build()
        .await?;
    let user = test.user().insert_user("weeder").await?;
    test.user()
        .grant(user.id, Permission::DeleteCatalogBook)
        .await?;
    let author = test.catalog().insert_author("Octavia E. Butler").await?;
    let book = test.catalog().insert_book("Kindred", author.id).await?;
    log_in(&test, user.id).await;
    let csrf_token = csrf_token(&test).await;

    let result = delete_book(
        State(test.to_app_state()),
        test.session.clone(),
        Path(book.id),
        Form(CsrfOnly { csrf_token }),
    )
    .await;

    assert_eq!(
        result.unwrap().into_response().status(),
        StatusCode::SEE_OTHER
    );
    assert!(CatalogService::new(&test.db)
        .get_book(book.id)
        .await
        .unwrap()
        .is_none());

    Ok(())
}
