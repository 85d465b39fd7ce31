use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role attached to a user through their profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Role {
    #[sea_orm(string_value = "Admin")]
    Admin,
    #[sea_orm(string_value = "Librarian")]
    Librarian,
    #[sea_orm(string_value = "Member")]
    Member,
}

/// Named capability granted to a user directly or through a group.
///
/// The stored value is the permission's codename, `<app>.<model>.<action>` for bookshelf
/// models and `<app>.<action>` for the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Permission {
    #[sea_orm(string_value = "bookshelf.book.can_view")]
    ViewBook,
    #[sea_orm(string_value = "bookshelf.book.can_create")]
    CreateBook,
    #[sea_orm(string_value = "bookshelf.book.can_edit")]
    EditBook,
    #[sea_orm(string_value = "bookshelf.book.can_delete")]
    DeleteBook,
    #[sea_orm(string_value = "bookshelf.customuser.can_view")]
    ViewUser,
    #[sea_orm(string_value = "bookshelf.customuser.can_create")]
    CreateUser,
    #[sea_orm(string_value = "bookshelf.customuser.can_edit")]
    EditUser,
    #[sea_orm(string_value = "bookshelf.customuser.can_delete")]
    DeleteUser,
    #[sea_orm(string_value = "relationship_app.can_add_book")]
    AddCatalogBook,
    #[sea_orm(string_value = "relationship_app.can_change_book")]
    ChangeCatalogBook,
    #[sea_orm(string_value = "relationship_app.can_delete_book")]
    DeleteCatalogBook,
}
