use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{data::icontains, model::db::AuthorModel};

pub struct AuthorRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuthorRepository<'a, C> {
    /// Creates a new instance of [`AuthorRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the first author with exactly this name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<AuthorModel>, DbErr> {
        entity::prelude::Author::find()
            .filter(entity::author::Column::Name.eq(name))
            .order_by_asc(entity::author::Column::Id)
            .one(self.db)
            .await
    }

    /// Gets an author by name, creating it if none exists
    pub async fn get_or_create(&self, name: &str) -> Result<AuthorModel, DbErr> {
        if let Some(author) = self.find_by_name(name).await? {
            return Ok(author);
        }

        entity::author::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Lists authors ordered by name, optionally matching `search`
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<AuthorModel>, DbErr> {
        let mut query = entity::prelude::Author::find().order_by_asc(entity::author::Column::Name);

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query = query.filter(icontains(entity::author::Column::Name, search));
        }

        query.all(self.db).await
    }
}
