use entity::sea_orm_active_enums::Permission;
use maud::{html, Markup, DOCTYPE};

use crate::server::{
    form::{FormErrors, NON_FIELD_ERRORS},
    model::{
        auth::AuthUser,
        session::{csrf::CSRF_FIELD, flash::FlashMessage},
    },
};

/// Per-request data every page needs.
pub struct PageContext {
    pub user: Option<AuthUser>,
    pub flashes: Vec<FlashMessage>,
    pub csrf_token: String,
}

impl PageContext {
    /// Whether the signed in user holds `permission`
    pub fn can(&self, permission: Permission) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.has_perm(permission))
    }
}

/// Wraps `content` in the site layout
pub fn page(ctx: &PageContext, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Libris" }
            }
            body {
                nav {
                    a href="/" { "Libris" }
                    " "
                    a href="/relationship/books/" { "Catalog" }
                    " "
                    a href="/relationship/library/" { "Library" }
                    @if let Some(user) = &ctx.user {
                        " "
                        a href="/books/" { "Bookshelf" }
                        " "
                        a href="/books/search/" { "Search" }
                        @if user.is_staff() {
                            " "
                            a href="/admin/" { "Admin" }
                        }
                        " "
                        span class="user" { "Signed in as " strong { (user.username()) } }
                        form class="inline" method="post" action="/logout/" {
                            (csrf_input(ctx))
                            button type="submit" { "Log out" }
                        }
                    } @else {
                        " "
                        a href="/login/" { "Log in" }
                        " "
                        a href="/register/" { "Register" }
                    }
                }
                @if !ctx.flashes.is_empty() {
                    ul class="messages" {
                        @for flash in &ctx.flashes {
                            li class=(flash.level.css_class()) { (flash.text) }
                        }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

/// Hidden field carrying the session CSRF token
pub fn csrf_input(ctx: &PageContext) -> Markup {
    html! {
        input type="hidden" name=(CSRF_FIELD) value=(ctx.csrf_token);
    }
}

pub fn field_errors(errors: &FormErrors, field: &str) -> Markup {
    html! {
        @let messages = errors.field(field);
        @if !messages.is_empty() {
            ul class="errorlist" {
                @for message in messages {
                    li { (message) }
                }
            }
        }
    }
}

pub fn non_field_errors(errors: &FormErrors) -> Markup {
    field_errors(errors, NON_FIELD_ERRORS)
}

/// Labelled input with its error list
pub fn input_field(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    errors: &FormErrors,
) -> Markup {
    html! {
        p {
            label for=(name) { (label) }
            input type=(input_type) id=(name) name=(name) value=(value);
            (field_errors(errors, name))
        }
    }
}

/// A form posting to `action` with the CSRF field and a submit button
pub fn post_form(ctx: &PageContext, action: &str, submit: &str, fields: Markup) -> Markup {
    html! {
        form method="post" action=(action) {
            (csrf_input(ctx))
            (fields)
            button type="submit" { (submit) }
        }
    }
}
