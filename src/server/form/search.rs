use serde::Deserialize;

pub const MAX_QUERY_CHARS: usize = 100;

/// Search query string parameters
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchForm {
    pub q: Option<String>,
}

impl SearchForm {
    /// Sanitized query, `None` when nothing searchable remains.
    ///
    /// Trims, strips `< > " ' & ;` and `--`, then truncates to 100 characters.
    pub fn query(&self) -> Option<String> {
        let raw = self.q.as_deref()?.trim();

        let stripped: String = raw
            .chars()
            .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&' | ';'))
            .collect();

        let cleaned: String = stripped
            .replace("--", "")
            .chars()
            .take(MAX_QUERY_CHARS)
            .collect();

        let cleaned = cleaned.trim().to_string();

        (!cleaned.is_empty()).then_some(cleaned)
    }
}
