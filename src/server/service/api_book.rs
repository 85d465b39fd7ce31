use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::book::{ApiBookDto, ApiBookPayload},
    server::{
        data::api_book::ApiBookRepository,
        error::Error,
        form::api_book::{validate_full, validate_partial},
        model::db::ApiBookModel,
    },
};

/// Books managed through the JSON API.
pub struct ApiBookService<'a> {
    db: &'a DatabaseConnection,
}

fn to_dto(book: ApiBookModel) -> ApiBookDto {
    ApiBookDto {
        id: book.id,
        title: book.title,
        author: book.author,
        created_at: book.created_at,
        updated_at: book.updated_at,
    }
}

impl<'a> ApiBookService<'a> {
    /// Creates a new instance of [`ApiBookService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<ApiBookDto>, Error> {
        let books = ApiBookRepository::new(self.db).list().await?;

        Ok(books.into_iter().map(to_dto).collect())
    }

    /// # Returns
    /// - `Ok(ApiBookDto)` - The book
    /// - `Err(Error::NotFound)` - No book with this ID
    pub async fn get(&self, book_id: i32) -> Result<ApiBookDto, Error> {
        ApiBookRepository::new(self.db)
            .get(book_id)
            .await?
            .map(to_dto)
            .ok_or_else(|| Error::NotFound(format!("api book {}", book_id)))
    }

    /// Creates a book from a payload carrying every writable field.
    ///
    /// # Returns
    /// - `Ok(ApiBookDto)` - The created book
    /// - `Err(Error::Validation)` - Missing, blank or too long fields
    pub async fn create(&self, payload: &ApiBookPayload) -> Result<ApiBookDto, Error> {
        let (title, author) = validate_full(payload)?;

        let book = ApiBookRepository::new(self.db)
            .create(&title, &author, Utc::now().naive_utc())
            .await?;

        Ok(to_dto(book))
    }

    /// Replaces or partially updates a book.
    ///
    /// The book must exist before the payload is validated.
    ///
    /// # Arguments
    /// - `book_id` - ID of the book
    /// - `payload` - New field values
    /// - `partial` - Fields absent from the payload keep their value when `true`
    ///
    /// # Returns
    /// - `Ok(ApiBookDto)` - The updated book
    /// - `Err(Error::NotFound)` - No book with this ID
    /// - `Err(Error::Validation)` - Invalid payload
    pub async fn update(
        &self,
        book_id: i32,
        payload: &ApiBookPayload,
        partial: bool,
    ) -> Result<ApiBookDto, Error> {
        self.get(book_id).await?;

        let (title, author) = if partial {
            let changes = validate_partial(payload)?;
            (changes.title, changes.author)
        } else {
            let (title, author) = validate_full(payload)?;
            (Some(title), Some(author))
        };

        ApiBookRepository::new(self.db)
            .update(
                book_id,
                title.as_deref(),
                author.as_deref(),
                Utc::now().naive_utc(),
            )
            .await?
            .map(to_dto)
            .ok_or_else(|| Error::NotFound(format!("api book {}", book_id)))
    }

    /// # Returns
    /// - `Ok(())` - The book was deleted
    /// - `Err(Error::NotFound)` - No book with this ID
    pub async fn delete(&self, book_id: i32) -> Result<(), Error> {
        let result = ApiBookRepository::new(self.db).delete(book_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("api book {}", book_id)));
        }

        Ok(())
    }
}
