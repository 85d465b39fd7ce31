//! End-to-end check of the book API against a running server.
//!
//! Runs sequentially: an unauthenticated list must be refused, then a token is obtained
//! and a book is listed, created, retrieved, replaced and deleted. Any unexpected status
//! stops the run.

use reqwest::StatusCode;

use crate::{
    client::{ApiClient, ClientError},
    model::book::{ApiBookDto, ApiBookPayload},
};

pub static DEFAULT_USERNAME: &str = "admin";
pub static DEFAULT_PASSWORD: &str = "admin123";

/// What a successful run saw, for printing by the caller.
#[derive(Debug, Default)]
pub struct SmokeReport {
    pub listed: usize,
    pub listed_all: usize,
    pub created: Option<ApiBookDto>,
    pub updated: Option<ApiBookDto>,
}

fn mismatch(step: &str, reason: impl Into<String>) -> ClientError {
    ClientError::Mismatch {
        step: step.to_string(),
        reason: reason.into(),
    }
}

/// Runs every step against `server_url` with the given credentials.
///
/// # Returns
/// - `Ok(SmokeReport)` - All steps passed
/// - `Err(ClientError)` - The first failing step
pub async fn run(
    server_url: &str,
    username: &str,
    password: &str,
) -> Result<SmokeReport, ClientError> {
    let anonymous = ApiClient::new(server_url);

    let status = anonymous.list_books_status().await?;
    if status != StatusCode::UNAUTHORIZED {
        return Err(ClientError::UnexpectedStatus {
            step: "unauthenticated list".to_string(),
            expected: StatusCode::UNAUTHORIZED,
            actual: status,
            body: String::new(),
        });
    }
    tracing::info!("unauthenticated request correctly denied");

    let token = anonymous.obtain_token(username, password).await?;
    let client = ApiClient::new(server_url).with_token(token);
    tracing::info!(username, "obtained API token");

    let mut report = SmokeReport {
        listed: client.list_books("/books/").await?.len(),
        listed_all: client.list_books("/books_all/").await?.len(),
        ..Default::default()
    };
    tracing::info!(books = report.listed, books_all = report.listed_all, "listed books");

    let new_book = ApiBookPayload {
        title: Some("Test-Driven Development with Python".to_string()),
        author: Some("Harry Percival".to_string()),
    };
    let created = client.create_book(&new_book).await?;
    tracing::info!(book_id = created.id, "created book");

    let fetched = client.get_book(created.id).await?;
    if fetched.title != created.title || fetched.author != created.author {
        return Err(mismatch("retrieve book", "retrieved fields differ from created book"));
    }

    let replacement = ApiBookPayload {
        title: Some("Test-Driven Development with Python (Updated)".to_string()),
        author: Some("Harry Percival (Updated)".to_string()),
    };
    let updated = client.update_book(created.id, &replacement).await?;
    if Some(&updated.title) != replacement.title.as_ref() {
        return Err(mismatch("update book", "title was not replaced"));
    }
    tracing::info!(book_id = updated.id, "updated book");

    client.delete_book(created.id).await?;
    tracing::info!(book_id = created.id, "deleted book");

    report.created = Some(created);
    report.updated = Some(updated);

    Ok(report)
}
