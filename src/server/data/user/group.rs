use entity::sea_orm_active_enums::Permission;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::db::GroupModel;

pub struct GroupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupRepository<'a, C> {
    /// Creates a new instance of [`GroupRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<GroupModel>, DbErr> {
        entity::prelude::AuthGroup::find()
            .filter(entity::auth_group::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Gets a group by name, creating it if it does not exist
    ///
    /// # Returns
    /// - `(GroupModel, true)` if the group was created
    /// - `(GroupModel, false)` if it already existed
    pub async fn get_or_create(&self, name: &str) -> Result<(GroupModel, bool), DbErr> {
        if let Some(group) = self.find_by_name(name).await? {
            return Ok((group, false));
        }

        let group = entity::auth_group::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok((group, true))
    }

    /// Adds a permission to a group unless it already holds it
    pub async fn add_permission(&self, group_id: i32, permission: Permission) -> Result<(), DbErr> {
        let existing = entity::prelude::GroupPermission::find()
            .filter(entity::group_permission::Column::GroupId.eq(group_id))
            .filter(entity::group_permission::Column::Permission.eq(permission))
            .one(self.db)
            .await?;

        if existing.is_none() {
            entity::group_permission::ActiveModel {
                group_id: ActiveValue::Set(group_id),
                permission: ActiveValue::Set(permission),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    /// Adds a user to a group unless they are already a member
    pub async fn add_user(&self, group_id: i32, user_id: i32) -> Result<(), DbErr> {
        let existing = entity::prelude::UserGroup::find()
            .filter(entity::user_group::Column::GroupId.eq(group_id))
            .filter(entity::user_group::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        if existing.is_none() {
            entity::user_group::ActiveModel {
                group_id: ActiveValue::Set(group_id),
                user_id: ActiveValue::Set(user_id),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    pub async fn permissions(&self, group_id: i32) -> Result<Vec<Permission>, DbErr> {
        let rows = entity::prelude::GroupPermission::find()
            .filter(entity::group_permission::Column::GroupId.eq(group_id))
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.permission).collect())
    }
}
