use serde::{Deserialize, Serialize};

use crate::server::form::{FormErrors, NON_FIELD_ERRORS};

pub static MISSING_TITLE_OR_AUTHOR: &str = "Please provide both title and author.";

const MAX_TITLE_CHARS: usize = 200;
const MAX_AUTHOR_CHARS: usize = 100;

/// Catalog add/edit form; the author is looked up or created by name
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CatalogBookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

impl CatalogBookForm {
    /// Returns the trimmed `(title, author_name)` pair.
    pub fn validate(&self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::default();
        let title = self.title.trim();
        let author = self.author.trim();

        if title.is_empty() || author.is_empty() {
            errors.add(NON_FIELD_ERRORS, MISSING_TITLE_OR_AUTHOR);
        } else {
            if title.chars().count() > MAX_TITLE_CHARS {
                errors.add(
                    "title",
                    format!("Ensure this value has at most {} characters.", MAX_TITLE_CHARS),
                );
            }
            if author.chars().count() > MAX_AUTHOR_CHARS {
                errors.add(
                    "author",
                    format!("Ensure this value has at most {} characters.", MAX_AUTHOR_CHARS),
                );
            }
        }

        errors.into_result((title.to_string(), author.to_string()))
    }
}
