use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::api::{ErrorDto, TokenDto, TokenRequestDto},
    server::{
        controller::api::ApiJson, error::Error, model::app::AppState,
        service::token::TokenService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Exchange a username and password for an API token
///
/// The token is created on first use, later calls return the same token.
#[utoipa::path(
    post,
    path = "/api/auth/token/",
    tag = AUTH_TAG,
    request_body = TokenRequestDto,
    responses(
        (status = 200, description = "Token for the given credentials", body = TokenDto),
        (status = 400, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn obtain_token(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let token = TokenService::new(&state.db)
        .obtain(request.username.trim(), &request.password)
        .await?;

    Ok((StatusCode::OK, Json(TokenDto { token })))
}
