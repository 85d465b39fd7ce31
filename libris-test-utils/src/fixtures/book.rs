//! Bookshelf book fixture utilities.

use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::BookModel, TestContext};

impl TestContext {
    pub fn book<'a>(&'a self) -> BookFixtures<'a> {
        BookFixtures { setup: self }
    }
}

pub struct BookFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> BookFixtures<'a> {
    /// Insert a bookshelf book, bypassing form validation.
    pub async fn insert_book(
        &self,
        title: &str,
        author: &str,
        publication_year: i32,
    ) -> Result<BookModel, TestError> {
        Ok(
            entity::prelude::Book::insert(entity::book::ActiveModel {
                title: ActiveValue::Set(title.to_string()),
                author: ActiveValue::Set(author.to_string()),
                publication_year: ActiveValue::Set(publication_year),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a book with fixed, valid field values.
    pub async fn insert_mock_book(&self) -> Result<BookModel, TestError> {
        self.insert_book("The Hobbit", "J.R.R. Tolkien", 1937).await
    }
}
