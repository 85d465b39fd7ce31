use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "library_book")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub library_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub book_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::library::Entity",
        from = "Column::LibraryId",
        to = "super::library::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Library,
    #[sea_orm(
        belongs_to = "super::catalog_book::Entity",
        from = "Column::BookId",
        to = "super::catalog_book::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CatalogBook,
}

impl Related<super::library::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Library.def()
    }
}

impl Related<super::catalog_book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogBook.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
