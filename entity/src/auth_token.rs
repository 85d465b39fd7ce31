use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_token")]
pub struct Model {
    /// 40 character hex key sent as `Authorization: Token <key>`
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub created: DateTime,
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
