use serde::{Deserialize, Serialize};

use crate::server::{
    form::{clean_text, FormErrors, TextRules, REQUIRED},
    model::db::BookModel,
};

pub const MIN_PUBLICATION_YEAR: i32 = 1000;
pub const MAX_PUBLICATION_YEAR: i32 = 2024;

const TITLE: TextRules<'static> = TextRules {
    label: "Title",
    min_chars: 2,
    max_chars: 200,
};

const AUTHOR: TextRules<'static> = TextRules {
    label: "Author name",
    min_chars: 2,
    max_chars: 100,
};

/// Bookshelf book form as submitted
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publication_year: String,
}

/// Validated book fields ready to persist
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidBook {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
}

impl BookForm {
    /// Pre-filled form for editing an existing book
    pub fn from_model(book: &BookModel) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            publication_year: book.publication_year.to_string(),
        }
    }

    pub fn validate(&self) -> Result<ValidBook, FormErrors> {
        let mut errors = FormErrors::default();

        let title = clean_text(&mut errors, "title", &self.title, &TITLE);
        let author = clean_text(&mut errors, "author", &self.author, &AUTHOR);
        let publication_year = clean_year(&mut errors, &self.publication_year);

        errors.into_result(ValidBook {
            title,
            author,
            publication_year: publication_year.unwrap_or_default(),
        })
    }
}

fn clean_year(errors: &mut FormErrors, value: &str) -> Option<i32> {
    let value = value.trim();

    if value.is_empty() {
        errors.add("publication_year", REQUIRED);
        return None;
    }

    let Ok(year) = value.parse::<i32>() else {
        errors.add("publication_year", "Enter a whole number.");
        return None;
    };

    if !(MIN_PUBLICATION_YEAR..=MAX_PUBLICATION_YEAR).contains(&year) {
        errors.add(
            "publication_year",
            format!(
                "Publication year must be between {} and {}.",
                MIN_PUBLICATION_YEAR, MAX_PUBLICATION_YEAR
            ),
        );
        return None;
    }

    Some(year)
}

#[cfg(test)]
mod tests {
    use super::{BookForm, ValidBook};

    fn form(title: &str, author: &str, year: &str) -> BookForm {
        BookForm {
            title: title.to_string(),
            author: author.to_string(),
            publication_year: year.to_string(),
        }
    }

    #[test]
    fn accepts_valid_book() {
        let result = form(" Dune ", "Frank Herbert", "1965").validate();

        assert_eq!(
            result,
            Ok(ValidBook {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                publication_year: 1965,
            })
        );
    }

    /// Expect every markup character to be rejected in both text fields
    #[test]
    fn rejects_markup_characters() {
        for c in ['<', '>', '"', '\'', '&'] {
            let errors = form(&format!("Bad {} title", c), &format!("Bad {} author", c), "2000")
                .validate()
                .unwrap_err();

            assert_eq!(errors.field("title"), ["Title contains invalid characters."]);
            assert_eq!(
                errors.field("author"),
                ["Author name contains invalid characters."]
            );
        }
    }

    #[test]
    fn rejects_short_values() {
        let errors = form("A", "B", "2000").validate().unwrap_err();

        assert_eq!(errors.field("title"), ["Title must be at least 2 characters long."]);
        assert_eq!(
            errors.field("author"),
            ["Author name must be at least 2 characters long."]
        );
    }

    /// Expect years outside 1000..=2024 to be rejected, including zero
    #[test]
    fn rejects_out_of_range_years() {
        for year in ["0", "999", "2025", "-5"] {
            let errors = form("Dune", "Frank Herbert", year).validate().unwrap_err();

            assert_eq!(
                errors.field("publication_year"),
                ["Publication year must be between 1000 and 2024."]
            );
        }
    }

    #[test]
    fn accepts_year_bounds() {
        assert!(form("Dune", "Frank Herbert", "1000").validate().is_ok());
        assert!(form("Dune", "Frank Herbert", "2024").validate().is_ok());
    }

    #[test]
    fn rejects_non_numeric_year() {
        let errors = form("Dune", "Frank Herbert", "nineteen").validate().unwrap_err();

        assert!(errors.has("publication_year"));
    }

    #[test]
    fn rejects_overlong_title() {
        let errors = form(&"x".repeat(201), "Frank Herbert", "1965")
            .validate()
            .unwrap_err();

        assert!(errors.has("title"));
    }
}
