//! Form parsing and validation.
//!
//! Each form is a plain `Deserialize` struct matching the submitted fields, with a
//! `validate` method that trims and checks the input and returns either cleaned values or
//! [`FormErrors`]. Failed forms are re-rendered with their messages and nothing is
//! persisted.

pub mod admin;
pub mod api_book;
pub mod book;
pub mod catalog;
pub mod example;
pub mod password;
pub mod search;
pub mod user;

use std::collections::BTreeMap;

use thiserror::Error;

/// Characters rejected in free text fields that end up in rendered pages
pub const DANGEROUS_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// Key for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "__all__";

pub static REQUIRED: &str = "This field is required.";

/// Validation messages keyed by field name.
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("submitted data failed validation")]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages for one field, empty when the field is valid
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// `Ok(value)` when no errors were recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

pub fn contains_dangerous(value: &str) -> bool {
    value.chars().any(|c| DANGEROUS_CHARS.contains(&c))
}

/// Rules for a trimmed, required free text field.
pub(crate) struct TextRules<'a> {
    /// Message prefix, e.g. "Title" or "Author name"
    pub label: &'a str,
    pub min_chars: usize,
    pub max_chars: usize,
}

/// Trim `value` and check it against `rules`, recording at most one error for `field`.
///
/// Returns the trimmed value whether or not it passed.
pub(crate) fn clean_text(
    errors: &mut FormErrors,
    field: &str,
    value: &str,
    rules: &TextRules,
) -> String {
    let value = value.trim();
    let length = value.chars().count();

    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if length < rules.min_chars {
        errors.add(
            field,
            format!(
                "{} must be at least {} characters long.",
                rules.label, rules.min_chars
            ),
        );
    } else if length > rules.max_chars {
        errors.add(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                rules.max_chars, length
            ),
        );
    } else if contains_dangerous(value) {
        errors.add(field, format!("{} contains invalid characters.", rules.label));
    }

    value.to_string()
}
