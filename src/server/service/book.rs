use sea_orm::DatabaseConnection;

use crate::server::{
    data::book::{BookFilter, BookRepository},
    error::Error,
    form::book::ValidBook,
    model::db::BookModel,
};

/// Maximum number of books returned by the title search
pub const SEARCH_RESULT_LIMIT: u64 = 50;

/// Bookshelf book management.
pub struct BookService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookService<'a> {
    /// Creates a new instance of [`BookService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All books ordered by title
    pub async fn list(&self) -> Result<Vec<BookModel>, Error> {
        self.filter(&BookFilter::default()).await
    }

    /// Books matching admin search and filters, ordered by title
    pub async fn filter(&self, filter: &BookFilter) -> Result<Vec<BookModel>, Error> {
        Ok(BookRepository::new(self.db).list(filter).await?)
    }

    /// # Returns
    /// - `Ok(BookModel)` - The book
    /// - `Err(Error::NotFound)` - No book with this ID
    pub async fn get(&self, book_id: i32) -> Result<BookModel, Error> {
        BookRepository::new(self.db)
            .get(book_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("book {}", book_id)))
    }

    pub async fn create(&self, book: &ValidBook) -> Result<BookModel, Error> {
        let book = BookRepository::new(self.db)
            .create(&book.title, &book.author, book.publication_year)
            .await?;

        tracing::info!(book_id = book.id, title = %book.title, "created book");

        Ok(book)
    }

    /// # Returns
    /// - `Ok(BookModel)` - The updated book
    /// - `Err(Error::NotFound)` - No book with this ID
    pub async fn update(&self, book_id: i32, book: &ValidBook) -> Result<BookModel, Error> {
        BookRepository::new(self.db)
            .update(book_id, &book.title, &book.author, book.publication_year)
            .await?
            .ok_or_else(|| Error::NotFound(format!("book {}", book_id)))
    }

    /// Deletes a book and returns it as it was before deletion.
    ///
    /// # Returns
    /// - `Ok(BookModel)` - The deleted book
    /// - `Err(Error::NotFound)` - No book with this ID
    pub async fn delete(&self, book_id: i32) -> Result<BookModel, Error> {
        let book = self.get(book_id).await?;

        BookRepository::new(self.db).delete(book.id).await?;

        tracing::info!(book_id = book.id, title = %book.title, "deleted book");

        Ok(book)
    }

    /// Title search limited to [`SEARCH_RESULT_LIMIT`] results.
    ///
    /// # Arguments
    /// - `query` - Sanitized query from [`SearchForm`](crate::server::form::search::SearchForm)
    pub async fn search(&self, query: &str) -> Result<Vec<BookModel>, Error> {
        Ok(BookRepository::new(self.db)
            .search_titles(query, SEARCH_RESULT_LIMIT)
            .await?)
    }

    /// Distinct authors and publication years for the admin filters
    pub async fn filter_choices(&self) -> Result<(Vec<String>, Vec<i32>), Error> {
        let book_repo = BookRepository::new(self.db);

        Ok((book_repo.authors().await?, book_repo.publication_years().await?))
    }
}
