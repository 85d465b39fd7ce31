use chrono::Utc;
use entity::sea_orm_active_enums::Role;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::user::{profile::UserProfileRepository, UserRepository},
    error::{user::UserError, Error},
    model::{
        db::{UserModel, UserProfileModel},
        user::{NewUser, UserChanges, UserFilter},
    },
    util::password::hash_password,
};

/// Service for managing user accounts and their profiles.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a regular user together with a Member profile.
    ///
    /// The password is hashed before anything is written, user and profile are
    /// inserted in one transaction.
    ///
    /// # Arguments
    /// - `new_user` - Validated registration data
    ///
    /// # Returns
    /// - `Ok(UserModel)` - The created user
    /// - `Err(Error::UserError(UserError::UsernameTaken))` - Username already exists
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn create_user(&self, new_user: &NewUser) -> Result<UserModel, Error> {
        self.create(new_user, false, false, Role::Member).await
    }

    /// Creates a staff superuser together with an Admin profile.
    pub async fn create_superuser(&self, new_user: &NewUser) -> Result<UserModel, Error> {
        self.create(new_user, true, true, Role::Admin).await
    }

    async fn create(
        &self,
        new_user: &NewUser,
        is_staff: bool,
        is_superuser: bool,
        role: Role,
    ) -> Result<UserModel, Error> {
        if UserRepository::new(self.db)
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameTaken(new_user.username.clone()).into());
        }

        let password_hash = hash_password(&new_user.password)?;

        let txn = self.db.begin().await?;

        let user = UserRepository::new(&txn)
            .create(
                new_user,
                password_hash,
                is_staff,
                is_superuser,
                Utc::now().naive_utc(),
            )
            .await?;
        UserProfileRepository::new(&txn).create(user.id, role).await?;

        txn.commit().await?;

        tracing::info!(user_id = user.id, username = %user.username, is_superuser, "created user");

        Ok(user)
    }

    /// Retrieves a user and the role from its profile.
    ///
    /// # Returns
    /// - `Ok(Some((UserModel, Option<Role>)))` - User found, role is `None` without a profile
    /// - `Ok(None)` - User not found
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn get_user(&self, user_id: i32) -> Result<Option<(UserModel, Option<Role>)>, Error> {
        let user = UserRepository::new(self.db).get(user_id).await?;

        Ok(user.map(|(user, profile)| (user, profile.map(|p| p.role))))
    }

    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserModel>, Error> {
        Ok(UserRepository::new(self.db).list(filter).await?)
    }

    /// Profiles with their users for the admin changelist
    pub async fn profiles(
        &self,
        role: Option<Role>,
        username: Option<&str>,
    ) -> Result<Vec<(UserProfileModel, Option<UserModel>)>, Error> {
        Ok(UserProfileRepository::new(self.db)
            .list(role, username)
            .await?)
    }

    /// Applies admin changes to a user and its profile role in one transaction.
    ///
    /// # Returns
    /// - `Ok(Some(UserModel))` - Updated user
    /// - `Ok(None)` - User not found
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn update_user(
        &self,
        user_id: i32,
        changes: &UserChanges,
    ) -> Result<Option<UserModel>, Error> {
        let txn = self.db.begin().await?;

        let Some(user) = UserRepository::new(&txn).update(user_id, changes).await? else {
            return Ok(None);
        };
        UserProfileRepository::new(&txn)
            .set_role(user_id, changes.role)
            .await?;

        txn.commit().await?;

        Ok(Some(user))
    }

    /// Deletes a user, returns `false` if the user did not exist.
    pub async fn delete_user(&self, user_id: i32) -> Result<bool, Error> {
        let result = UserRepository::new(self.db).delete(user_id).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn record_login(&self, user_id: i32) -> Result<(), Error> {
        UserRepository::new(self.db)
            .set_last_login(user_id, Utc::now().naive_utc())
            .await?;

        Ok(())
    }
}
