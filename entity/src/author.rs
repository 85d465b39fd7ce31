use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::catalog_book::Entity")]
    CatalogBook,
}

impl Related<super::catalog_book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogBook.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
