use entity::sea_orm_active_enums::Role;
use serde::Deserialize;

use crate::server::form::{search::SearchForm, user::parse_role};

/// Changelist query string: search box plus every list filter the admin pages offer.
///
/// Pages read only the filters they render, unknown or empty values mean "all".
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub q: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<String>,
    pub author_id: Option<String>,
    pub is_staff: Option<String>,
    pub is_superuser: Option<String>,
    pub is_active: Option<String>,
    pub role: Option<String>,
}

impl AdminQuery {
    /// Sanitized search term, same rules as the public book search
    pub fn search(&self) -> Option<String> {
        SearchForm { q: self.q.clone() }.query()
    }

    pub fn author(&self) -> Option<String> {
        non_empty(&self.author).map(str::to_string)
    }

    pub fn publication_year(&self) -> Option<i32> {
        non_empty(&self.publication_year)?.parse().ok()
    }

    pub fn author_id(&self) -> Option<i32> {
        non_empty(&self.author_id)?.parse().ok()
    }

    pub fn is_staff(&self) -> Option<bool> {
        flag(&self.is_staff)
    }

    pub fn is_superuser(&self) -> Option<bool> {
        flag(&self.is_superuser)
    }

    pub fn is_active(&self) -> Option<bool> {
        flag(&self.is_active)
    }

    pub fn role(&self) -> Option<Role> {
        parse_role(non_empty(&self.role)?)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `1`/`true` and `0`/`false`, anything else leaves the filter off
fn flag(value: &Option<String>) -> Option<bool> {
    match non_empty(value)? {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
