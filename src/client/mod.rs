//! HTTP client for a running Libris server.
//!
//! Used by the `smoke-test` command to exercise the token authenticated book API end to
//! end.

pub mod smoke;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use thiserror::Error;

use crate::model::{
    api::{TokenDto, TokenRequestDto},
    book::{ApiBookDto, ApiBookPayload},
};

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a status the caller did not expect.
    #[error("{step}: expected status {expected} but got {actual}: {body}")]
    UnexpectedStatus {
        step: String,
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },
    /// A response did not carry the data the step checks for.
    #[error("{step}: {reason}")]
    Mismatch { step: String, reason: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Thin wrapper over [`reqwest::Client`] bound to one server's API.
pub struct ApiClient {
    http: reqwest::Client,
    /// API root without a trailing slash, e.g. `http://127.0.0.1:8000/api`
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a new instance of [`ApiClient`] for the server at `server_url`
    pub fn new(server_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/api", server_url.trim_end_matches('/')),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        match &self.token {
            Some(token) => request.header("Authorization", format!("Token {}", token)),
            None => request,
        }
    }

    /// Fails with [`ClientError::UnexpectedStatus`] unless `response` has `expected`
    async fn expect_status(
        step: &str,
        response: Response,
        expected: StatusCode,
    ) -> Result<Response, ClientError> {
        let actual = response.status();
        if actual == expected {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        Err(ClientError::UnexpectedStatus {
            step: step.to_string(),
            expected,
            actual,
            body,
        })
    }

    /// Status of an unauthenticated or authenticated `GET /api/books/`
    pub async fn list_books_status(&self) -> Result<StatusCode, ClientError> {
        Ok(self.request(Method::GET, "/books/").send().await?.status())
    }

    pub async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .request(Method::POST, "/auth/token/")
            .json(&TokenRequestDto {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let response = Self::expect_status("obtain token", response, StatusCode::OK).await?;
        let token: TokenDto = response.json().await?;

        Ok(token.token)
    }

    /// `GET /api/books/` or `GET /api/books_all/`
    pub async fn list_books(&self, path: &str) -> Result<Vec<ApiBookDto>, ClientError> {
        let response = self.request(Method::GET, path).send().await?;
        let response = Self::expect_status(path, response, StatusCode::OK).await?;

        Ok(response.json().await?)
    }

    pub async fn create_book(&self, payload: &ApiBookPayload) -> Result<ApiBookDto, ClientError> {
        let response = self
            .request(Method::POST, "/books_all/")
            .json(payload)
            .send()
            .await?;
        let response = Self::expect_status("create book", response, StatusCode::CREATED).await?;

        Ok(response.json().await?)
    }

    pub async fn get_book(&self, id: i32) -> Result<ApiBookDto, ClientError> {
        let response = self
            .request(Method::GET, &format!("/books_all/{}/", id))
            .send()
            .await?;
        let response = Self::expect_status("retrieve book", response, StatusCode::OK).await?;

        Ok(response.json().await?)
    }

    pub async fn update_book(
        &self,
        id: i32,
        payload: &ApiBookPayload,
    ) -> Result<ApiBookDto, ClientError> {
        let response = self
            .request(Method::PUT, &format!("/books_all/{}/", id))
            .json(payload)
            .send()
            .await?;
        let response = Self::expect_status("update book", response, StatusCode::OK).await?;

        Ok(response.json().await?)
    }

    pub async fn delete_book(&self, id: i32) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/books_all/{}/", id))
            .send()
            .await?;
        Self::expect_status("delete book", response, StatusCode::NO_CONTENT).await?;

        Ok(())
    }
}
