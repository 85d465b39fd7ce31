use entity::sea_orm_active_enums::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::{
    data::icontains,
    model::db::{UserModel, UserProfileModel},
};

pub struct UserProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserProfileRepository<'a, C> {
    /// Creates a new instance of [`UserProfileRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i32, role: Role) -> Result<UserProfileModel, DbErr> {
        let profile = entity::user_profile::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role),
            ..Default::default()
        };

        profile.insert(self.db).await
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<UserProfileModel>, DbErr> {
        entity::prelude::UserProfile::find()
            .filter(entity::user_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Sets the role on a user's profile, creating the profile if it is missing
    pub async fn set_role(&self, user_id: i32, role: Role) -> Result<UserProfileModel, DbErr> {
        match self.find_by_user(user_id).await? {
            Some(profile) => {
                let mut profile_am = profile.into_active_model();
                profile_am.role = ActiveValue::Set(role);

                profile_am.update(self.db).await
            }
            None => self.create(user_id, role).await,
        }
    }

    /// Lists profiles with their user, ordered by profile id
    ///
    /// # Arguments
    /// - `role` - Only include profiles with this role
    /// - `username` - Only include users whose username contains this value
    pub async fn list(
        &self,
        role: Option<Role>,
        username: Option<&str>,
    ) -> Result<Vec<(UserProfileModel, Option<UserModel>)>, DbErr> {
        let mut query = entity::prelude::UserProfile::find()
            .find_also_related(entity::custom_user::Entity)
            .order_by_asc(entity::user_profile::Column::Id);

        if let Some(role) = role {
            query = query.filter(entity::user_profile::Column::Role.eq(role));
        }
        if let Some(username) = username.filter(|s| !s.is_empty()) {
            query = query.filter(icontains(entity::custom_user::Column::Username, username));
        }

        query.all(self.db).await
    }
}
