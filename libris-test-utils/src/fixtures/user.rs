//! Account fixture utilities.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use entity::sea_orm_active_enums::{Permission, Role};
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    constant::TEST_PASSWORD,
    error::TestError,
    model::{AuthTokenModel, UserModel, UserProfileModel},
    TestContext,
};

impl TestContext {
    pub fn user<'a>(&'a self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an active, non-staff user with a Member profile.
    ///
    /// The password is always [`TEST_PASSWORD`].
    pub async fn insert_user(&self, username: &str) -> Result<UserModel, TestError> {
        self.insert_user_with(username, false, false, true).await
    }

    /// Insert an active staff user with a Member profile.
    pub async fn insert_staff_user(&self, username: &str) -> Result<UserModel, TestError> {
        self.insert_user_with(username, true, false, true).await
    }

    /// Insert an active superuser with an Admin profile.
    pub async fn insert_superuser(&self, username: &str) -> Result<UserModel, TestError> {
        let user = self.insert_user_with(username, true, true, true).await?;
        self.set_role(user.id, Role::Admin).await?;

        Ok(user)
    }

    /// Insert a deactivated user with a Member profile.
    pub async fn insert_inactive_user(&self, username: &str) -> Result<UserModel, TestError> {
        self.insert_user_with(username, false, false, false).await
    }

    /// Insert a user together with its profile using the provided flags.
    ///
    /// # Arguments
    /// - `username` - Unique username
    /// - `is_staff` - Staff flag
    /// - `is_superuser` - Superuser flag
    /// - `is_active` - Active flag
    ///
    /// # Returns
    /// - `Ok(UserModel)` - The created user
    /// - `Err(TestError::DbErr)` - Insert failed, e.g. duplicate username
    /// - `Err(TestError::PasswordHash)` - Password hashing failed
    pub async fn insert_user_with(
        &self,
        username: &str,
        is_staff: bool,
        is_superuser: bool,
        is_active: bool,
    ) -> Result<UserModel, TestError> {
        let salt = SaltString::generate(&mut OsRng);
        let password = Argon2::default()
            .hash_password(TEST_PASSWORD.as_bytes(), &salt)
            .map_err(|e| TestError::PasswordHash(e.to_string()))?
            .to_string();

        let user = entity::prelude::CustomUser::insert(entity::custom_user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(Some(format!("{}@example.com", username))),
            first_name: ActiveValue::Set(String::new()),
            last_name: ActiveValue::Set(String::new()),
            password: ActiveValue::Set(password),
            date_of_birth: ActiveValue::Set(None),
            profile_photo: ActiveValue::Set(None),
            is_staff: ActiveValue::Set(is_staff),
            is_superuser: ActiveValue::Set(is_superuser),
            is_active: ActiveValue::Set(is_active),
            date_joined: ActiveValue::Set(Utc::now().naive_utc()),
            last_login: ActiveValue::Set(None),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        entity::prelude::UserProfile::insert(entity::user_profile::ActiveModel {
            user_id: ActiveValue::Set(user.id),
            role: ActiveValue::Set(Role::Member),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        Ok(user)
    }

    /// Change the role on an existing user's profile.
    pub async fn set_role(&self, user_id: i32, role: Role) -> Result<UserProfileModel, TestError> {
        let profile = entity::prelude::UserProfile::find()
            .filter(entity::user_profile::Column::UserId.eq(user_id))
            .one(&self.setup.db)
            .await?
            .ok_or_else(|| {
                sea_orm::DbErr::RecordNotFound(format!("profile for user {}", user_id))
            })?;

        let mut active: entity::user_profile::ActiveModel = profile.into();
        active.role = ActiveValue::Set(role);

        Ok(entity::prelude::UserProfile::update(active)
            .exec(&self.setup.db)
            .await?)
    }

    /// Grant a permission directly to a user.
    pub async fn grant(&self, user_id: i32, permission: Permission) -> Result<(), TestError> {
        entity::prelude::UserPermission::insert(entity::user_permission::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            permission: ActiveValue::Set(permission),
            ..Default::default()
        })
        .exec(&self.setup.db)
        .await?;

        Ok(())
    }

    /// Create a group holding `permissions` and add the user to it.
    pub async fn add_to_new_group(
        &self,
        user_id: i32,
        group_name: &str,
        permissions: &[Permission],
    ) -> Result<i32, TestError> {
        let group = entity::prelude::AuthGroup::insert(entity::auth_group::ActiveModel {
            name: ActiveValue::Set(group_name.to_string()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        for permission in permissions {
            entity::prelude::GroupPermission::insert(entity::group_permission::ActiveModel {
                group_id: ActiveValue::Set(group.id),
                permission: ActiveValue::Set(*permission),
                ..Default::default()
            })
            .exec(&self.setup.db)
            .await?;
        }

        entity::prelude::UserGroup::insert(entity::user_group::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            group_id: ActiveValue::Set(group.id),
            ..Default::default()
        })
        .exec(&self.setup.db)
        .await?;

        Ok(group.id)
    }

    /// Insert an API token for the user with a random 40 character hex key.
    pub async fn insert_token(&self, user_id: i32) -> Result<AuthTokenModel, TestError> {
        let key = hex::encode(rand::random::<[u8; 20]>());

        Ok(
            entity::prelude::AuthToken::insert(entity::auth_token::ActiveModel {
                key: ActiveValue::Set(key),
                user_id: ActiveValue::Set(user_id),
                created: ActiveValue::Set(Utc::now().naive_utc()),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
