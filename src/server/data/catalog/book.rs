use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::{
    data::icontains,
    model::db::{AuthorModel, CatalogBookModel},
};

pub struct CatalogBookRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CatalogBookRepository<'a, C> {
    /// Creates a new instance of [`CatalogBookRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, title: &str, author_id: i32) -> Result<CatalogBookModel, DbErr> {
        entity::catalog_book::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            author_id: ActiveValue::Set(author_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, book_id: i32) -> Result<Option<CatalogBookModel>, DbErr> {
        entity::prelude::CatalogBook::find_by_id(book_id)
            .one(self.db)
            .await
    }

    pub async fn get_with_author(
        &self,
        book_id: i32,
    ) -> Result<Option<(CatalogBookModel, Option<AuthorModel>)>, DbErr> {
        entity::prelude::CatalogBook::find_by_id(book_id)
            .find_also_related(entity::author::Entity)
            .one(self.db)
            .await
    }

    /// Lists books with their author ordered by title
    ///
    /// # Arguments
    /// - `search` - Matches the title or the author's name
    /// - `author_id` - Only include books by this author
    pub async fn list_with_author(
        &self,
        search: Option<&str>,
        author_id: Option<i32>,
    ) -> Result<Vec<(CatalogBookModel, Option<AuthorModel>)>, DbErr> {
        let mut query = entity::prelude::CatalogBook::find()
            .find_also_related(entity::author::Entity)
            .order_by_asc(entity::catalog_book::Column::Title);

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(icontains(entity::catalog_book::Column::Title, search))
                    .add(icontains(entity::author::Column::Name, search)),
            );
        }
        if let Some(author_id) = author_id {
            query = query.filter(entity::catalog_book::Column::AuthorId.eq(author_id));
        }

        query.all(self.db).await
    }

    /// Books written by an author, ordered by title
    pub async fn by_author(&self, author_id: i32) -> Result<Vec<CatalogBookModel>, DbErr> {
        entity::prelude::CatalogBook::find()
            .filter(entity::catalog_book::Column::AuthorId.eq(author_id))
            .order_by_asc(entity::catalog_book::Column::Title)
            .all(self.db)
            .await
    }

    /// Updates a book's title and author
    ///
    /// Returns `Ok(None)` if the book does not exist.
    pub async fn update(
        &self,
        book_id: i32,
        title: &str,
        author_id: i32,
    ) -> Result<Option<CatalogBookModel>, DbErr> {
        let book = match self.get(book_id).await? {
            Some(book) => book,
            None => return Ok(None),
        };

        let mut book_am = book.into_active_model();
        book_am.title = ActiveValue::Set(title.to_string());
        book_am.author_id = ActiveValue::Set(author_id);

        Ok(Some(book_am.update(self.db).await?))
    }

    /// Deletes a book, library memberships cascade
    ///
    /// Returns OK regardless of book existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, book_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::CatalogBook::delete_by_id(book_id)
            .exec(self.db)
            .await
    }
}
