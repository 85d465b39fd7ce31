use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("A user with username {0:?} already exists")]
    UsernameTaken(String),
    #[error("User {0:?} not found")]
    UserNotFound(String),
    #[error("Group {0:?} not found")]
    GroupNotFound(String),
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::UsernameTaken(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound(_) | Self::GroupNotFound(_) => StatusCode::NOT_FOUND,
        };

        tracing::debug!("{}", self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
