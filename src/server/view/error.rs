use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

/// Standalone page shown for page route errors, rendered without session data
pub fn error_page(status: StatusCode) -> Markup {
    let title = status.canonical_reason().unwrap_or("Error");
    let message = match status {
        StatusCode::FORBIDDEN => "You do not have permission to view this page.",
        StatusCode::NOT_FOUND => "The requested page was not found.",
        _ => "Something went wrong while handling your request.",
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (status.as_u16()) " " (title) " | Libris" }
            }
            body {
                main {
                    h1 { (status.as_u16()) " " (title) }
                    p { (message) }
                    p { a href="/" { "Back to the home page" } }
                }
            }
        }
    }
}
