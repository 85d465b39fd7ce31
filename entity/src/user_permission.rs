use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::Permission;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_permission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub permission: Permission,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::custom_user::Entity",
        from = "Column::UserId",
        to = "super::custom_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CustomUser,
}

impl Related<super::custom_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
