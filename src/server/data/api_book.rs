use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryOrder,
};

use crate::server::model::db::ApiBookModel;

pub struct ApiBookRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ApiBookRepository<'a, C> {
    /// Creates a new instance of [`ApiBookRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Lists all API books ordered by id
    pub async fn list(&self) -> Result<Vec<ApiBookModel>, DbErr> {
        entity::prelude::ApiBook::find()
            .order_by_asc(entity::api_book::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get(&self, book_id: i32) -> Result<Option<ApiBookModel>, DbErr> {
        entity::prelude::ApiBook::find_by_id(book_id).one(self.db).await
    }

    /// Creates a book with both timestamps set to `now`
    pub async fn create(
        &self,
        title: &str,
        author: &str,
        now: NaiveDateTime,
    ) -> Result<ApiBookModel, DbErr> {
        entity::api_book::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            author: ActiveValue::Set(author.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Updates the given fields and bumps `updated_at`
    ///
    /// Fields passed as `None` keep their stored value. Returns `Ok(None)` if the
    /// book does not exist.
    pub async fn update(
        &self,
        book_id: i32,
        title: Option<&str>,
        author: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Option<ApiBookModel>, DbErr> {
        let book = match self.get(book_id).await? {
            Some(book) => book,
            None => return Ok(None),
        };

        let mut book_am = book.into_active_model();
        if let Some(title) = title {
            book_am.title = ActiveValue::Set(title.to_string());
        }
        if let Some(author) = author {
            book_am.author = ActiveValue::Set(author.to_string());
        }
        book_am.updated_at = ActiveValue::Set(now);

        Ok(Some(book_am.update(self.db).await?))
    }

    /// Deletes a book
    ///
    /// Returns OK regardless of book existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, book_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ApiBook::delete_by_id(book_id)
            .exec(self.db)
            .await
    }
}
