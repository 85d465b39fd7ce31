use entity::sea_orm_active_enums::Permission;
use maud::{html, Markup};

use crate::server::{
    form::{catalog::CatalogBookForm, FormErrors},
    model::db::CatalogBookModel,
    service::catalog::{BookWithAuthor, LibraryDetail},
    view::layout::{input_field, non_field_errors, page, post_form, PageContext},
};

fn author_name(book: &BookWithAuthor) -> &str {
    book.1.as_ref().map(|a| a.name.as_str()).unwrap_or("Unknown")
}

pub fn list_books(ctx: &PageContext, books: &[BookWithAuthor]) -> Markup {
    page(
        ctx,
        "Books Available",
        html! {
            @if ctx.can(Permission::AddCatalogBook) {
                p { a href="/relationship/add_book/" { "Add a book" } }
            }
            ul {
                @for book in books {
                    li {
                        (book.0.title) " by " (author_name(book))
                        @if ctx.can(Permission::ChangeCatalogBook) {
                            " "
                            a href={ "/relationship/edit_book/" (book.0.id) "/" } { "Edit" }
                        }
                        @if ctx.can(Permission::DeleteCatalogBook) {
                            " "
                            a href={ "/relationship/delete_book/" (book.0.id) "/" } { "Delete" }
                        }
                    }
                }
            }
        },
    )
}

/// Library page, `None` renders the empty state
pub fn library_detail(ctx: &PageContext, detail: Option<&LibraryDetail>) -> Markup {
    let Some(detail) = detail else {
        return page(ctx, "Library", html! { p { "No library found." } });
    };

    page(
        ctx,
        &detail.library.name,
        html! {
            p {
                "Librarian: "
                @match &detail.librarian {
                    Some(librarian) => (librarian.name),
                    None => "none assigned",
                }
            }
            h2 { "Books" }
            @if detail.books.is_empty() {
                p { "This library has no books yet." }
            } @else {
                ul {
                    @for book in &detail.books {
                        li { (book.0.title) " by " (author_name(book)) }
                    }
                }
            }
        },
    )
}

pub fn book_form(
    ctx: &PageContext,
    heading: &str,
    action: &str,
    form: &CatalogBookForm,
    errors: &FormErrors,
) -> Markup {
    page(
        ctx,
        heading,
        html! {
            (post_form(
                ctx,
                action,
                "Save",
                html! {
                    (non_field_errors(errors))
                    (input_field("Title", "title", "text", &form.title, errors))
                    (input_field("Author", "author", "text", &form.author, errors))
                },
            ))
            p { a href="/relationship/books/" { "Back to list" } }
        },
    )
}

pub fn delete_confirm(ctx: &PageContext, book: &CatalogBookModel) -> Markup {
    page(
        ctx,
        "Delete Book",
        html! {
            p { "Are you sure you want to delete \"" (book.title) "\"?" }
            (post_form(
                ctx,
                &format!("/relationship/delete_book/{}/", book.id),
                "Yes, delete",
                html! {},
            ))
            p { a href="/relationship/books/" { "Cancel" } }
        },
    )
}
