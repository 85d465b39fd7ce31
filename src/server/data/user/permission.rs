use std::collections::HashSet;

use entity::sea_orm_active_enums::Permission;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct PermissionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PermissionRepository<'a, C> {
    /// Creates a new instance of [`PermissionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Grants a permission directly to a user
    ///
    /// Returns `false` if the user already held the permission directly.
    pub async fn grant(&self, user_id: i32, permission: Permission) -> Result<bool, DbErr> {
        let existing = entity::prelude::UserPermission::find()
            .filter(entity::user_permission::Column::UserId.eq(user_id))
            .filter(entity::user_permission::Column::Permission.eq(permission))
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        entity::user_permission::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            permission: ActiveValue::Set(permission),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Permissions granted directly to the user
    pub async fn direct(&self, user_id: i32) -> Result<Vec<Permission>, DbErr> {
        let rows = entity::prelude::UserPermission::find()
            .filter(entity::user_permission::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.permission).collect())
    }

    /// Effective permissions of a user, the union of direct and group permissions
    pub async fn for_user(&self, user_id: i32) -> Result<HashSet<Permission>, DbErr> {
        let mut permissions: HashSet<Permission> =
            self.direct(user_id).await?.into_iter().collect();

        let group_ids: Vec<i32> = entity::prelude::UserGroup::find()
            .filter(entity::user_group::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|membership| membership.group_id)
            .collect();

        if group_ids.is_empty() {
            return Ok(permissions);
        }

        let group_permissions = entity::prelude::GroupPermission::find()
            .filter(entity::group_permission::Column::GroupId.is_in(group_ids))
            .all(self.db)
            .await?;

        permissions.extend(group_permissions.into_iter().map(|row| row.permission));

        Ok(permissions)
    }
}
