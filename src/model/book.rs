use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book exposed through the JSON API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiBookDto {
    #[schema(read_only)]
    pub id: i32,
    pub title: String,
    pub author: String,
    #[schema(read_only)]
    pub created_at: NaiveDateTime,
    #[schema(read_only)]
    pub updated_at: NaiveDateTime,
}

/// Writable fields of an API book.
///
/// Both fields are required when creating or replacing a book and optional for a
/// partial update. Read-only fields sent by clients are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ApiBookPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}
