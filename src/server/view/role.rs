use entity::sea_orm_active_enums::Role;
use maud::{html, Markup};

use crate::server::{
    form::user::role_name,
    view::layout::{page, PageContext},
};

/// Landing page of a role-gated area
pub fn role_page(ctx: &PageContext, role: Role) -> Markup {
    let blurb = match role {
        Role::Admin => "Manage users, roles and the whole catalog.",
        Role::Librarian => "Maintain the catalog and look after your library's collection.",
        Role::Member => "Browse the catalog and find your next read.",
    };

    page(
        ctx,
        &format!("{} Dashboard", role_name(role)),
        html! {
            p { "Welcome, " (ctx.user.as_ref().map(|u| u.username()).unwrap_or_default()) "." }
            p { (blurb) }
        },
    )
}
