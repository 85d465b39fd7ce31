pub mod group;
pub mod permission;
pub mod profile;
pub mod token;

use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::{
    data::icontains,
    model::{
        db::{UserModel, UserProfileModel},
        user::{NewUser, UserChanges, UserFilter},
    },
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new active user
    ///
    /// The profile is not created here, see
    /// [`UserService::create_user`](crate::server::service::user::UserService::create_user).
    pub async fn create(
        &self,
        user: &NewUser,
        password_hash: String,
        is_staff: bool,
        is_superuser: bool,
        date_joined: NaiveDateTime,
    ) -> Result<UserModel, DbErr> {
        let user = entity::custom_user::ActiveModel {
            username: ActiveValue::Set(user.username.clone()),
            email: ActiveValue::Set(user.email.clone()),
            first_name: ActiveValue::Set(user.first_name.clone()),
            last_name: ActiveValue::Set(user.last_name.clone()),
            password: ActiveValue::Set(password_hash),
            date_of_birth: ActiveValue::Set(user.date_of_birth),
            profile_photo: ActiveValue::Set(None),
            is_staff: ActiveValue::Set(is_staff),
            is_superuser: ActiveValue::Set(is_superuser),
            is_active: ActiveValue::Set(true),
            date_joined: ActiveValue::Set(date_joined),
            last_login: ActiveValue::Set(None),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    /// Gets a user together with its profile
    pub async fn get(
        &self,
        user_id: i32,
    ) -> Result<Option<(UserModel, Option<UserProfileModel>)>, DbErr> {
        entity::prelude::CustomUser::find_by_id(user_id)
            .find_also_related(entity::user_profile::Entity)
            .one(self.db)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::CustomUser::find()
            .filter(entity::custom_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Lists users ordered by username
    ///
    /// Search matches username, first name, last name or email.
    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<UserModel>, DbErr> {
        use entity::custom_user::Column;

        let mut query = entity::prelude::CustomUser::find().order_by_asc(Column::Username);

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(icontains(Column::Username, search))
                    .add(icontains(Column::FirstName, search))
                    .add(icontains(Column::LastName, search))
                    .add(icontains(Column::Email, search)),
            );
        }
        if let Some(is_staff) = filter.is_staff {
            query = query.filter(Column::IsStaff.eq(is_staff));
        }
        if let Some(is_superuser) = filter.is_superuser {
            query = query.filter(Column::IsSuperuser.eq(is_superuser));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(Column::IsActive.eq(is_active));
        }

        query.all(self.db).await
    }

    /// Updates the account fields of a user, the profile role is left untouched
    ///
    /// Returns `Ok(None)` if the user does not exist.
    pub async fn update(
        &self,
        user_id: i32,
        changes: &UserChanges,
    ) -> Result<Option<UserModel>, DbErr> {
        let user = match entity::prelude::CustomUser::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        user_am.email = ActiveValue::Set(changes.email.clone());
        user_am.first_name = ActiveValue::Set(changes.first_name.clone());
        user_am.last_name = ActiveValue::Set(changes.last_name.clone());
        user_am.date_of_birth = ActiveValue::Set(changes.date_of_birth);
        user_am.is_active = ActiveValue::Set(changes.is_active);
        user_am.is_staff = ActiveValue::Set(changes.is_staff);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Records a successful login
    pub async fn set_last_login(&self, user_id: i32, at: NaiveDateTime) -> Result<(), DbErr> {
        entity::prelude::CustomUser::update_many()
            .col_expr(entity::custom_user::Column::LastLogin, Expr::value(at))
            .filter(entity::custom_user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a user, the profile, permissions, groups memberships and token cascade
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::CustomUser::delete_by_id(user_id)
            .exec(self.db)
            .await
    }
}
