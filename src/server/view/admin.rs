//! Staff admin pages: an index plus one changelist per model.

use entity::sea_orm_active_enums::{Permission, Role};
use maud::{html, Markup};
use sea_orm::Iterable;

use crate::server::{
    form::{
        admin::AdminQuery,
        user::{role_name, UserChangeForm, UserCreationForm},
        FormErrors,
    },
    model::{
        auth::AuthUser,
        db::{AuthorModel, BookModel, LibrarianModel, LibraryModel, UserModel, UserProfileModel},
        user::UserAge,
    },
    service::catalog::BookWithAuthor,
    view::{
        auth::user_creation_fields,
        layout::{field_errors, input_field, non_field_errors, page, post_form, PageContext},
    },
};

/// A model page listed on the admin index.
pub struct AdminSection {
    pub title: &'static str,
    pub href: &'static str,
    /// Needed on top of staff status, `None` for staff-only pages
    pub permission: Option<Permission>,
}

pub static SECTIONS: [AdminSection; 7] = [
    AdminSection {
        title: "Books",
        href: "/admin/books/",
        permission: Some(Permission::ViewBook),
    },
    AdminSection {
        title: "Users",
        href: "/admin/users/",
        permission: Some(Permission::ViewUser),
    },
    AdminSection {
        title: "User profiles",
        href: "/admin/profiles/",
        permission: None,
    },
    AdminSection {
        title: "Authors",
        href: "/admin/authors/",
        permission: None,
    },
    AdminSection {
        title: "Catalog books",
        href: "/admin/catalog-books/",
        permission: None,
    },
    AdminSection {
        title: "Libraries",
        href: "/admin/libraries/",
        permission: None,
    },
    AdminSection {
        title: "Librarians",
        href: "/admin/librarians/",
        permission: None,
    },
];

/// Sections `user` may open
pub fn visible_sections(user: &AuthUser) -> Vec<&'static AdminSection> {
    SECTIONS
        .iter()
        .filter(|section| section.permission.is_none_or(|p| user.has_perm(p)))
        .collect()
}

pub fn index(ctx: &PageContext) -> Markup {
    let sections = ctx
        .user
        .as_ref()
        .map(visible_sections)
        .unwrap_or_default();

    page(
        ctx,
        "Site administration",
        html! {
            @if sections.is_empty() {
                p { "You don't have permission to view or edit anything." }
            } @else {
                ul {
                    @for section in sections {
                        li { a href=(section.href) { (section.title) } }
                    }
                }
            }
        },
    )
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// A `<select>` for a list filter, the empty option means "All"
fn select_filter(label: &str, name: &str, options: &[(String, String)], selected: &str) -> Markup {
    html! {
        label for=(name) { (label) }
        select id=(name) name=(name) {
            option value="" { "All" }
            @for (value, text) in options {
                @if value == selected {
                    option value=(value) selected { (text) }
                } @else {
                    option value=(value) { (text) }
                }
            }
        }
    }
}

fn flag_filter(label: &str, name: &str, selected: Option<&str>) -> Markup {
    let options = [
        ("1".to_string(), "Yes".to_string()),
        ("0".to_string(), "No".to_string()),
    ];
    select_filter(label, name, &options, selected.unwrap_or_default())
}

/// Search box and filters, submitted with GET to the current page
fn toolbar(action: &str, query: &AdminQuery, filters: Markup) -> Markup {
    html! {
        form method="get" action=(action) class="toolbar" {
            input type="search" name="q" value=(query.q.as_deref().unwrap_or_default())
                placeholder="Search";
            (filters)
            button type="submit" { "Apply" }
        }
    }
}

fn result_count(count: usize) -> Markup {
    html! {
        p class="paginator" {
            (count) " " @if count == 1 { "result" } @else { "results" }
        }
    }
}

pub fn books(
    ctx: &PageContext,
    query: &AdminQuery,
    books: &[BookModel],
    authors: &[String],
    years: &[i32],
) -> Markup {
    let author_options: Vec<_> = authors.iter().map(|a| (a.clone(), a.clone())).collect();
    let year_options: Vec<_> = years
        .iter()
        .map(|y| (y.to_string(), y.to_string()))
        .collect();

    page(
        ctx,
        "Books",
        html! {
            (toolbar("/admin/books/", query, html! {
                (select_filter("Author", "author", &author_options,
                    query.author.as_deref().unwrap_or_default()))
                (select_filter("Publication year", "publication_year", &year_options,
                    query.publication_year.as_deref().unwrap_or_default()))
            }))
            (result_count(books.len()))
            table {
                thead { tr { th { "Title" } th { "Author" } th { "Publication year" } } }
                tbody {
                    @for book in books {
                        tr {
                            td { a href={ "/books/" (book.id) "/" } { (book.title) } }
                            td { (book.author) }
                            td { (book.publication_year) }
                        }
                    }
                }
            }
        },
    )
}

pub fn users(ctx: &PageContext, query: &AdminQuery, users: &[UserModel]) -> Markup {
    page(
        ctx,
        "Users",
        html! {
            @if ctx.can(Permission::CreateUser) {
                p { a href="/admin/users/add/" { "Add user" } }
            }
            (toolbar("/admin/users/", query, html! {
                (flag_filter("Staff status", "is_staff", query.is_staff.as_deref()))
                (flag_filter("Superuser status", "is_superuser", query.is_superuser.as_deref()))
                (flag_filter("Active", "is_active", query.is_active.as_deref()))
            }))
            (result_count(users.len()))
            table {
                thead {
                    tr {
                        th { "Username" } th { "Email" } th { "First name" } th { "Last name" }
                        th { "Date of birth" } th { "Age" } th { "Staff" } th { "Active" }
                        th { "Date joined" } th {}
                    }
                }
                tbody {
                    @for user in users {
                        tr {
                            td {
                                @if ctx.can(Permission::EditUser) {
                                    a href={ "/admin/users/" (user.id) "/change/" } {
                                        (user.username)
                                    }
                                } @else {
                                    (user.username)
                                }
                            }
                            td { (user.email.as_deref().unwrap_or_default()) }
                            td { (user.first_name) }
                            td { (user.last_name) }
                            td {
                                @if let Some(date_of_birth) = user.date_of_birth {
                                    (date_of_birth.format("%Y-%m-%d"))
                                }
                            }
                            td {
                                @if let Some(age) = user.get_age() {
                                    (age)
                                }
                            }
                            td { (yes_no(user.is_staff)) }
                            td { (yes_no(user.is_active)) }
                            td { (user.date_joined.format("%Y-%m-%d %H:%M")) }
                            td {
                                @if ctx.can(Permission::DeleteUser) {
                                    a href={ "/admin/users/" (user.id) "/delete/" } { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn user_add(ctx: &PageContext, form: &UserCreationForm, errors: &FormErrors) -> Markup {
    page(
        ctx,
        "Add user",
        post_form(
            ctx,
            "/admin/users/add/",
            "Save",
            user_creation_fields(form, errors),
        ),
    )
}

pub fn user_change(
    ctx: &PageContext,
    user: &UserModel,
    form: &UserChangeForm,
    errors: &FormErrors,
) -> Markup {
    page(
        ctx,
        &format!("Change user {}", user.username),
        html! {
            (post_form(
                ctx,
                &format!("/admin/users/{}/change/", user.id),
                "Save",
                html! {
                    (non_field_errors(errors))
                    (input_field("Email", "email", "email", &form.email, errors))
                    (input_field("First name", "first_name", "text", &form.first_name, errors))
                    (input_field("Last name", "last_name", "text", &form.last_name, errors))
                    (input_field("Date of birth", "date_of_birth", "date", &form.date_of_birth,
                        errors))
                    p {
                        label for="is_active" { "Active" }
                        input type="checkbox" id="is_active" name="is_active"
                            checked[form.is_active.is_some()];
                    }
                    p {
                        label for="is_staff" { "Staff status" }
                        input type="checkbox" id="is_staff" name="is_staff"
                            checked[form.is_staff.is_some()];
                    }
                    p {
                        label for="role" { "Role" }
                        select id="role" name="role" {
                            @for role in Role::iter() {
                                @let name = role_name(role);
                                option value=(name) selected[form.role == name] { (name) }
                            }
                        }
                        (field_errors(errors, "role"))
                    }
                },
            ))
            p { a href="/admin/users/" { "Back to users" } }
        },
    )
}

pub fn user_delete_confirm(ctx: &PageContext, user: &UserModel) -> Markup {
    page(
        ctx,
        "Are you sure?",
        html! {
            p { "Are you sure you want to delete the user \"" (user.username) "\"?" }
            (post_form(
                ctx,
                &format!("/admin/users/{}/delete/", user.id),
                "Yes, I'm sure",
                html! {},
            ))
            p { a href="/admin/users/" { "No, take me back" } }
        },
    )
}

pub fn profiles(
    ctx: &PageContext,
    query: &AdminQuery,
    profiles: &[(UserProfileModel, Option<UserModel>)],
) -> Markup {
    let role_options: Vec<_> = Role::iter()
        .map(|role| (role_name(role).to_string(), role_name(role).to_string()))
        .collect();

    page(
        ctx,
        "User profiles",
        html! {
            (toolbar("/admin/profiles/", query, select_filter(
                "Role", "role", &role_options, query.role.as_deref().unwrap_or_default(),
            )))
            (result_count(profiles.len()))
            table {
                thead { tr { th { "User" } th { "Role" } } }
                tbody {
                    @for (profile, user) in profiles {
                        tr {
                            td { (user.as_ref().map(|u| u.username.as_str()).unwrap_or("-")) }
                            td { (role_name(profile.role)) }
                        }
                    }
                }
            }
        },
    )
}

pub fn authors(ctx: &PageContext, query: &AdminQuery, authors: &[AuthorModel]) -> Markup {
    page(
        ctx,
        "Authors",
        html! {
            (toolbar("/admin/authors/", query, html! {}))
            (result_count(authors.len()))
            table {
                thead { tr { th { "Name" } } }
                tbody {
                    @for author in authors {
                        tr { td { (author.name) } }
                    }
                }
            }
        },
    )
}

pub fn catalog_books(
    ctx: &PageContext,
    query: &AdminQuery,
    books: &[BookWithAuthor],
    authors: &[AuthorModel],
) -> Markup {
    let author_options: Vec<_> = authors
        .iter()
        .map(|a| (a.id.to_string(), a.name.clone()))
        .collect();

    page(
        ctx,
        "Catalog books",
        html! {
            (toolbar("/admin/catalog-books/", query, select_filter(
                "Author", "author_id", &author_options,
                query.author_id.as_deref().unwrap_or_default(),
            )))
            (result_count(books.len()))
            table {
                thead { tr { th { "Title" } th { "Author" } } }
                tbody {
                    @for (book, author) in books {
                        tr {
                            td { (book.title) }
                            td { (author.as_ref().map(|a| a.name.as_str()).unwrap_or("-")) }
                        }
                    }
                }
            }
        },
    )
}

pub fn libraries(ctx: &PageContext, query: &AdminQuery, libraries: &[LibraryModel]) -> Markup {
    page(
        ctx,
        "Libraries",
        html! {
            (toolbar("/admin/libraries/", query, html! {}))
            (result_count(libraries.len()))
            table {
                thead { tr { th { "Name" } } }
                tbody {
                    @for library in libraries {
                        tr {
                            td {
                                a href={ "/relationship/library/" (library.id) "/" } {
                                    (library.name)
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn librarians(
    ctx: &PageContext,
    query: &AdminQuery,
    librarians: &[(LibrarianModel, Option<LibraryModel>)],
) -> Markup {
    page(
        ctx,
        "Librarians",
        html! {
            (toolbar("/admin/librarians/", query, html! {}))
            (result_count(librarians.len()))
            table {
                thead { tr { th { "Name" } th { "Library" } } }
                tbody {
                    @for (librarian, library) in librarians {
                        tr {
                            td { (librarian.name) }
                            td { (library.as_ref().map(|l| l.name.as_str()).unwrap_or("-")) }
                        }
                    }
                }
            }
        },
    )
}
