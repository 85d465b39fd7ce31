use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::db::{AuthTokenModel, UserModel};

pub struct AuthTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuthTokenRepository<'a, C> {
    /// Creates a new instance of [`AuthTokenRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        key: String,
        created: NaiveDateTime,
    ) -> Result<AuthTokenModel, DbErr> {
        entity::auth_token::ActiveModel {
            key: ActiveValue::Set(key),
            user_id: ActiveValue::Set(user_id),
            created: ActiveValue::Set(created),
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<AuthTokenModel>, DbErr> {
        entity::prelude::AuthToken::find()
            .filter(entity::auth_token::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Finds a token and the user it belongs to
    pub async fn find_by_key(
        &self,
        key: &str,
    ) -> Result<Option<(AuthTokenModel, Option<UserModel>)>, DbErr> {
        entity::prelude::AuthToken::find_by_id(key.to_string())
            .find_also_related(entity::custom_user::Entity)
            .one(self.db)
            .await
    }
}
