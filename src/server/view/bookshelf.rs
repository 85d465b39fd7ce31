use entity::sea_orm_active_enums::Permission;
use maud::{html, Markup};

use crate::server::{
    form::{book::BookForm, example::ExampleForm, FormErrors},
    model::db::BookModel,
    view::layout::{
        field_errors, input_field, non_field_errors, page, post_form, PageContext,
    },
};

pub fn home(ctx: &PageContext) -> Markup {
    page(
        ctx,
        "Welcome",
        html! {
            p { "Browse the catalog, manage the bookshelf or try the contact form." }
            ul {
                li { a href="/books/" { "Bookshelf" } }
                li { a href="/books/search/" { "Search books" } }
                li { a href="/relationship/books/" { "Catalog books" } }
                li { a href="/relationship/library/" { "Library" } }
                li { a href="/form-example/" { "Contact form" } }
            }
        },
    )
}

pub fn book_list(ctx: &PageContext, books: &[BookModel]) -> Markup {
    page(
        ctx,
        "Books",
        html! {
            @if ctx.can(Permission::CreateBook) {
                p { a href="/books/create/" { "Add a book" } }
            }
            @if books.is_empty() {
                p { "No books yet." }
            } @else {
                table {
                    thead { tr { th { "Title" } th { "Author" } th { "Year" } th {} } }
                    tbody {
                        @for book in books {
                            tr {
                                td { a href={ "/books/" (book.id) "/" } { (book.title) } }
                                td { (book.author) }
                                td { (book.publication_year) }
                                td {
                                    @if ctx.can(Permission::EditBook) {
                                        a href={ "/books/" (book.id) "/edit/" } { "Edit" }
                                        " "
                                    }
                                    @if ctx.can(Permission::DeleteBook) {
                                        a href={ "/books/" (book.id) "/delete/" } { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn book_detail(ctx: &PageContext, book: &BookModel) -> Markup {
    page(
        ctx,
        &book.title,
        html! {
            dl {
                dt { "Author" } dd { (book.author) }
                dt { "Publication year" } dd { (book.publication_year) }
            }
            p {
                @if ctx.can(Permission::EditBook) {
                    a href={ "/books/" (book.id) "/edit/" } { "Edit" }
                    " "
                }
                @if ctx.can(Permission::DeleteBook) {
                    a href={ "/books/" (book.id) "/delete/" } { "Delete" }
                    " "
                }
                a href="/books/" { "Back to list" }
            }
        },
    )
}

/// Create and edit form, `heading` is "Create Book" or "Edit Book"
pub fn book_form(
    ctx: &PageContext,
    heading: &str,
    action: &str,
    form: &BookForm,
    errors: &FormErrors,
) -> Markup {
    page(
        ctx,
        heading,
        post_form(
            ctx,
            action,
            "Save",
            html! {
                (non_field_errors(errors))
                (input_field("Title", "title", "text", &form.title, errors))
                (input_field("Author", "author", "text", &form.author, errors))
                (input_field(
                    "Publication year",
                    "publication_year",
                    "number",
                    &form.publication_year,
                    errors,
                ))
            },
        ),
    )
}

pub fn book_confirm_delete(ctx: &PageContext, book: &BookModel) -> Markup {
    page(
        ctx,
        "Delete Book",
        html! {
            p { "Are you sure you want to delete \"" (book.title) "\"?" }
            (post_form(ctx, &format!("/books/{}/delete/", book.id), "Yes, delete", html! {}))
            p { a href={ "/books/" (book.id) "/" } { "Cancel" } }
        },
    )
}

/// Search page; `query` is the sanitized query or `None` when nothing was searched
pub fn book_search(ctx: &PageContext, query: Option<&str>, books: &[BookModel]) -> Markup {
    page(
        ctx,
        "Search Books",
        html! {
            form method="get" action="/books/search/" {
                input type="search" name="q" maxlength="100" value=(query.unwrap_or_default());
                button type="submit" { "Search" }
            }
            @if let Some(query) = query {
                @if books.is_empty() {
                    p { "No books found for \"" (query) "\"." }
                } @else {
                    p { (books.len()) " result(s) for \"" (query) "\"" }
                    ul {
                        @for book in books {
                            li {
                                (book.title) " by " (book.author)
                                " (" (book.publication_year) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn form_example(ctx: &PageContext, form: &ExampleForm, errors: &FormErrors) -> Markup {
    page(
        ctx,
        "Contact Us",
        post_form(
            ctx,
            "/form-example/",
            "Send",
            html! {
                (non_field_errors(errors))
                (input_field("Name", "name", "text", &form.name, errors))
                (input_field("Email", "email", "email", &form.email, errors))
                p {
                    label for="message" { "Message" }
                    textarea id="message" name="message" rows="5" { (form.message) }
                    (field_errors(errors, "message"))
                }
            },
        ),
    )
}
