use entity::sea_orm_active_enums::Permission;
use sea_orm::{DatabaseConnection, Iterable, TransactionTrait};

use crate::server::{
    data::user::{group::GroupRepository, permission::PermissionRepository, UserRepository},
    error::{user::UserError, Error},
};

pub static VIEWERS: &str = "Viewers";
pub static EDITORS: &str = "Editors";
pub static ADMINS: &str = "Admins";

/// Default groups with their permissions, Admins hold every permission
pub fn default_groups() -> Vec<(&'static str, Vec<Permission>)> {
    vec![
        (VIEWERS, vec![Permission::ViewBook]),
        (
            EDITORS,
            vec![
                Permission::ViewBook,
                Permission::CreateBook,
                Permission::EditBook,
            ],
        ),
        (ADMINS, Permission::iter().collect()),
    ]
}

/// Groups and permission grants.
pub struct GroupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupService<'a> {
    /// Creates a new instance of [`GroupService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the Viewers, Editors and Admins groups with their permissions.
    ///
    /// Safe to run repeatedly, missing permissions are added to existing groups.
    ///
    /// # Returns
    /// - `Ok(Vec<(String, bool)>)` - Each group name and whether it was newly created
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn setup_default_groups(&self) -> Result<Vec<(String, bool)>, Error> {
        let txn = self.db.begin().await?;
        let group_repo = GroupRepository::new(&txn);
        let mut results = Vec::new();

        for (name, permissions) in default_groups() {
            let (group, created) = group_repo.get_or_create(name).await?;

            for permission in permissions {
                group_repo.add_permission(group.id, permission).await?;
            }

            results.push((group.name, created));
        }

        txn.commit().await?;

        Ok(results)
    }

    /// Adds a user to an existing group.
    ///
    /// # Returns
    /// - `Ok(())` - User is a member of the group
    /// - `Err(Error::UserError(UserError::UserNotFound))` - Unknown username
    /// - `Err(Error::UserError(UserError::GroupNotFound))` - Unknown group
    pub async fn add_user_to_group(&self, username: &str, group_name: &str) -> Result<(), Error> {
        let user = UserRepository::new(self.db)
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::UserNotFound(username.to_string()))?;

        let group_repo = GroupRepository::new(self.db);
        let group = group_repo
            .find_by_name(group_name)
            .await?
            .ok_or_else(|| UserError::GroupNotFound(group_name.to_string()))?;

        group_repo.add_user(group.id, user.id).await?;

        Ok(())
    }

    /// Grants a permission directly to a user.
    ///
    /// # Returns
    /// - `Ok(true)` - Permission was newly granted
    /// - `Ok(false)` - User already held it directly
    /// - `Err(Error::UserError(UserError::UserNotFound))` - Unknown username
    pub async fn grant(&self, username: &str, permission: Permission) -> Result<bool, Error> {
        let user = UserRepository::new(self.db)
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::UserNotFound(username.to_string()))?;

        let granted = PermissionRepository::new(self.db)
            .grant(user.id, permission)
            .await?;

        tracing::info!(
            user_id = user.id,
            permission = ?permission,
            granted,
            "granted permission"
        );

        Ok(granted)
    }
}
