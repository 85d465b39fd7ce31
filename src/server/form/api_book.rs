//! Validation of API book payloads.

use crate::{
    model::book::ApiBookPayload,
    server::form::{FormErrors, REQUIRED},
};

const MAX_TITLE_CHARS: usize = 200;
const MAX_AUTHOR_CHARS: usize = 100;

/// Validated API book fields; `None` leaves the stored value unchanged
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiBookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Validate a payload for create or full update, where every field is required.
pub fn validate_full(payload: &ApiBookPayload) -> Result<(String, String), FormErrors> {
    let mut errors = FormErrors::default();

    let title = clean_field(&mut errors, "title", payload.title.as_deref(), MAX_TITLE_CHARS, true);
    let author = clean_field(
        &mut errors,
        "author",
        payload.author.as_deref(),
        MAX_AUTHOR_CHARS,
        true,
    );

    errors.into_result((title.unwrap_or_default(), author.unwrap_or_default()))
}

/// Validate a payload for a partial update, where absent fields are skipped.
pub fn validate_partial(payload: &ApiBookPayload) -> Result<ApiBookChanges, FormErrors> {
    let mut errors = FormErrors::default();

    let title = clean_field(&mut errors, "title", payload.title.as_deref(), MAX_TITLE_CHARS, false);
    let author = clean_field(
        &mut errors,
        "author",
        payload.author.as_deref(),
        MAX_AUTHOR_CHARS,
        false,
    );

    errors.into_result(ApiBookChanges { title, author })
}

fn clean_field(
    errors: &mut FormErrors,
    field: &str,
    value: Option<&str>,
    max_chars: usize,
    required: bool,
) -> Option<String> {
    let Some(value) = value else {
        if required {
            errors.add(field, REQUIRED);
        }
        return None;
    };

    let value = value.trim();

    if value.is_empty() {
        errors.add(field, "This field may not be blank.");
        return None;
    }

    if value.chars().count() > max_chars {
        errors.add(
            field,
            format!("Ensure this field has no more than {} characters.", max_chars),
        );
        return None;
    }

    Some(value.to_string())
}
