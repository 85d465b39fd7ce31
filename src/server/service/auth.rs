use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::{permission::PermissionRepository, UserRepository},
    error::Error,
    model::{auth::AuthUser, db::UserModel},
    util::password::verify_password,
};

/// Credential checks and loading of request users.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks a username and password pair.
    ///
    /// Unknown usernames, wrong passwords and inactive accounts all fail the same way and
    /// are logged on the `security` target.
    ///
    /// # Returns
    /// - `Ok(Some(UserModel))` - Credentials are valid for an active account
    /// - `Ok(None)` - Authentication failed
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserModel>, Error> {
        let user = UserRepository::new(self.db).find_by_username(username).await?;

        let authenticated = user.filter(|user| {
            user.is_active && verify_password(password, &user.password)
        });

        if authenticated.is_none() {
            tracing::warn!(target: "security", username = %username, "failed login attempt");
        }

        Ok(authenticated)
    }

    /// Loads a user with its role and effective permissions.
    ///
    /// # Returns
    /// - `Ok(Some(AuthUser))` - User found
    /// - `Ok(None)` - No user with this ID
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn load_auth_user(&self, user_id: i32) -> Result<Option<AuthUser>, Error> {
        let Some((user, profile)) = UserRepository::new(self.db).get(user_id).await? else {
            return Ok(None);
        };

        let permissions = PermissionRepository::new(self.db).for_user(user.id).await?;

        Ok(Some(AuthUser::new(
            user,
            profile.map(|profile| profile.role),
            permissions,
        )))
    }
}

#[cfg(test)]
mod tests {
    mod authenticate {
        use libris_test_utils::prelude::*;

        use crate::server::service::auth::AuthService;

        /// Expect valid credentials to return the user
        #[tokio::test]
        async fn accepts_valid_credentials() -> Result<(), TestError> {
            let test = TestBuilder::new().with_user("ada").build().await?;

            let auth_service = AuthService::new(&test.db);
            let user = auth_service.authenticate("ada", TEST_PASSWORD).await.unwrap();

            assert_eq!(user.map(|u| u.username), Some("ada".to_string()));

            Ok(())
        }

        /// Expect a wrong password to fail
        #[tokio::test]
        async fn rejects_wrong_password() -> Result<(), TestError> {
            let test = TestBuilder::new().with_user("ada").build().await?;

            let auth_service = AuthService::new(&test.db);
            let user = auth_service.authenticate("ada", "wrong-password").await.unwrap();

            assert!(user.is_none());

            Ok(())
        }

        /// Expect inactive accounts to fail even with the right password
        #[tokio::test]
        async fn rejects_inactive_user() -> Result<(), TestError> {
            let test = TestBuilder::new().with_user_tables().build().await?;
            test.user().insert_inactive_user("ada").await?;

            let auth_service = AuthService::new(&test.db);
            let user = auth_service.authenticate("ada", TEST_PASSWORD).await.unwrap();

            assert!(user.is_none());

            Ok(())
        }
    }

    mod load_auth_user {
        use entity::sea_orm_active_enums::{Permission, Role};
        use libris_test_utils::prelude::*;

        use crate::server::service::auth::AuthService;

        /// Expect role and group permissions to be loaded
        #[tokio::test]
        async fn loads_role_and_permissions() -> Result<(), TestError> {
            let test = TestBuilder::new().with_user_tables().build().await?;
            let user = test.user().insert_user("ada").await?;
            test.user().set_role(user.id, Role::Librarian).await?;
            test.user()
                .add_to_new_group(user.id, "Viewers", &[Permission::ViewBook])
                .await?;

            let auth_service = AuthService::new(&test.db);
            let auth_user = auth_service.load_auth_user(user.id).await.unwrap().unwrap();

            assert!(auth_user.has_role(Role::Librarian));
            assert!(auth_user.has_perm(Permission::ViewBook));
            assert!(!auth_user.has_perm(Permission::DeleteBook));

            Ok(())
        }
    }
}
