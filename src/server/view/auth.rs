use maud::{html, Markup};

use crate::server::{
    form::{user::UserCreationForm, FormErrors},
    view::layout::{input_field, non_field_errors, page, post_form, PageContext},
};

/// Login page
///
/// # Arguments
/// - `username` - Value to prefill after a failed attempt
/// - `next` - Where to go after logging in, carried as a hidden field
/// - `errors` - Form errors, including the non-field credential error
pub fn login(ctx: &PageContext, username: &str, next: &str, errors: &FormErrors) -> Markup {
    page(
        ctx,
        "Log in",
        html! {
            (post_form(
                ctx,
                "/login/",
                "Log in",
                html! {
                    (non_field_errors(errors))
                    input type="hidden" name="next" value=(next);
                    (input_field("Username", "username", "text", username, errors))
                    (input_field("Password", "password", "password", "", errors))
                },
            ))
            p { "No account? " a href="/register/" { "Register" } }
        },
    )
}

/// Registration page; passwords are never echoed back
pub fn register(ctx: &PageContext, form: &UserCreationForm, errors: &FormErrors) -> Markup {
    page(
        ctx,
        "Register",
        post_form(
            ctx,
            "/register/",
            "Register",
            user_creation_fields(form, errors),
        ),
    )
}

/// Fields shared by registration and the admin "add user" page
pub fn user_creation_fields(form: &UserCreationForm, errors: &FormErrors) -> Markup {
    html! {
        (non_field_errors(errors))
        (input_field("Username", "username", "text", &form.username, errors))
        (input_field("Email", "email", "email", &form.email, errors))
        (input_field("First name", "first_name", "text", &form.first_name, errors))
        (input_field("Last name", "last_name", "text", &form.last_name, errors))
        (input_field("Date of birth", "date_of_birth", "date", &form.date_of_birth, errors))
        (input_field("Password", "password1", "password", "", errors))
        (input_field("Password confirmation", "password2", "password", "", errors))
    }
}

pub fn logout_confirm(ctx: &PageContext) -> Markup {
    page(
        ctx,
        "Log out",
        html! {
            p { "Do you want to log out?" }
            (post_form(ctx, "/logout/", "Log out", html! {}))
        },
    )
}

pub fn logged_out(ctx: &PageContext) -> Markup {
    page(
        ctx,
        "Logged out",
        html! {
            p { "You have been logged out." }
            p { a href="/login/" { "Log in again" } }
        },
    )
}
