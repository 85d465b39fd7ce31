//! Token authenticated JSON API.
//!
//! Every endpoint except token issuing requires an `Authorization: Token <key>` header,
//! extracted through [`ApiUser`]. Request bodies go through [`ApiJson`] so malformed or
//! wrongly typed JSON is answered like any other validation failure.

pub mod book;
pub mod token;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::server::{
    error::{auth::AuthError, Error},
    form::{FormErrors, NON_FIELD_ERRORS},
    model::{app::AppState, auth::AuthUser},
    service::token::TokenService,
};

/// Scheme name used in the header and advertised in `WWW-Authenticate`
pub static TOKEN_KEYWORD: &str = "Token";

/// The user owning the request's API token.
pub struct ApiUser(pub AuthUser);

/// Extracts the key from an `Authorization` header value.
///
/// # Returns
/// - `Ok(Some(key))` - `Token <key>`, the keyword is matched case-insensitively
/// - `Ok(None)` - Another scheme, treated as no credentials
/// - `Err(AuthError::InvalidToken)` - The keyword without exactly one key
pub fn parse_token_header(value: &str) -> Result<Option<&str>, AuthError> {
    let mut parts = value.split_whitespace();

    match parts.next() {
        Some(keyword) if keyword.eq_ignore_ascii_case(TOKEN_KEYWORD) => {}
        _ => return Ok(None),
    }

    match (parts.next(), parts.next()) {
        (Some(key), None) => Ok(Some(key)),
        _ => Err(AuthError::InvalidToken),
    }
}

impl FromRequestParts<AppState> for ApiUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| AuthError::InvalidToken))
            .transpose()?;

        let Some(key) = header.map(parse_token_header).transpose()?.flatten() else {
            return Err(AuthError::MissingCredentials.into());
        };

        let user = TokenService::new(&state.db).authenticate(key).await?;

        Ok(ApiUser(user))
    }
}

/// JSON request body whose rejections use the API's error shapes.
///
/// - Not declared as JSON: 415
/// - Unparseable JSON: 400 with an `error` message
/// - A field of the wrong type: 400 with `{field: [messages]}`
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => Error::UnsupportedMediaType,
                rejection => Error::BadRequest(rejection.body_text()),
            })?;

        match serde_json::from_value::<T>(value.clone()) {
            Ok(payload) => Ok(ApiJson(payload)),
            Err(err) => Err(field_errors::<T>(&value, &err).into()),
        }
    }
}

/// Attributes a deserialization failure to the offending top level fields.
///
/// Each field is decoded on its own, which relies on payload fields being optional.
/// Failures that cannot be pinned to a field are reported under [`NON_FIELD_ERRORS`].
fn field_errors<T: DeserializeOwned>(value: &Value, err: &serde_json::Error) -> FormErrors {
    let mut errors = FormErrors::default();

    let Value::Object(fields) = value else {
        errors.add(NON_FIELD_ERRORS, "Invalid data. Expected a JSON object.");
        return errors;
    };

    for (name, field) in fields {
        let single = Value::Object(Map::from_iter([(name.clone(), field.clone())]));

        if let Err(field_err) = serde_json::from_value::<T>(single) {
            errors.add(name, as_sentence(&field_err));
        }
    }

    if errors.is_empty() {
        errors.add(NON_FIELD_ERRORS, as_sentence(err));
    }

    errors
}

fn as_sentence(err: &serde_json::Error) -> String {
    let message = err.to_string();
    let mut chars = message.chars();

    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => "Invalid value.".to_string(),
    }
}
