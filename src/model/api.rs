use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Field level validation errors, keyed by field name
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct ValidationErrorDto {
    #[serde(flatten)]
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Credentials exchanged for an API token
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct TokenRequestDto {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// API token to send as `Authorization: Token <token>`
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct TokenDto {
    pub token: String,
}
