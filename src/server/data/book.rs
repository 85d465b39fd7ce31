use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{data::icontains, model::db::BookModel};

/// Admin book list search and filters, `None` means unfiltered
#[derive(Clone, Debug, Default)]
pub struct BookFilter {
    /// Matches title or author
    pub search: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
}

pub struct BookRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookRepository<'a, C> {
    /// Creates a new instance of [`BookRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: &str,
        author: &str,
        publication_year: i32,
    ) -> Result<BookModel, DbErr> {
        entity::book::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            author: ActiveValue::Set(author.to_string()),
            publication_year: ActiveValue::Set(publication_year),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, book_id: i32) -> Result<Option<BookModel>, DbErr> {
        entity::prelude::Book::find_by_id(book_id).one(self.db).await
    }

    /// Lists books ordered by title
    pub async fn list(&self, filter: &BookFilter) -> Result<Vec<BookModel>, DbErr> {
        use entity::book::Column;

        let mut query = entity::prelude::Book::find().order_by_asc(Column::Title);

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(icontains(Column::Title, search))
                    .add(icontains(Column::Author, search)),
            );
        }
        if let Some(author) = filter.author.as_deref() {
            query = query.filter(Column::Author.eq(author));
        }
        if let Some(year) = filter.publication_year {
            query = query.filter(Column::PublicationYear.eq(year));
        }

        query.all(self.db).await
    }

    /// Books whose title contains `query`, ordered by title
    ///
    /// # Arguments
    /// - `query` - Already sanitized search text
    /// - `limit` - Maximum number of results
    pub async fn search_titles(&self, query: &str, limit: u64) -> Result<Vec<BookModel>, DbErr> {
        entity::prelude::Book::find()
            .filter(icontains(entity::book::Column::Title, query))
            .order_by_asc(entity::book::Column::Title)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Updates a book
    ///
    /// Returns `Ok(None)` if the book does not exist.
    pub async fn update(
        &self,
        book_id: i32,
        title: &str,
        author: &str,
        publication_year: i32,
    ) -> Result<Option<BookModel>, DbErr> {
        let book = match self.get(book_id).await? {
            Some(book) => book,
            None => return Ok(None),
        };

        let mut book_am = book.into_active_model();
        book_am.title = ActiveValue::Set(title.to_string());
        book_am.author = ActiveValue::Set(author.to_string());
        book_am.publication_year = ActiveValue::Set(publication_year);

        Ok(Some(book_am.update(self.db).await?))
    }

    /// Deletes a book
    ///
    /// Returns OK regardless of book existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, book_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Book::delete_by_id(book_id)
            .exec(self.db)
            .await
    }

    /// Distinct author values for the admin filter sidebar
    pub async fn authors(&self) -> Result<Vec<String>, DbErr> {
        entity::prelude::Book::find()
            .select_only()
            .column(entity::book::Column::Author)
            .distinct()
            .order_by_asc(entity::book::Column::Author)
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Distinct publication years, newest first
    pub async fn publication_years(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Book::find()
            .select_only()
            .column(entity::book::Column::PublicationYear)
            .distinct()
            .order_by_desc(entity::book::Column::PublicationYear)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
