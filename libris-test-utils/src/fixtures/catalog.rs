//! Catalog fixture utilities.
//!
//! Inserts authors, catalog books, libraries and librarians. Parents must be inserted
//! first; none of these helpers create missing parents.

use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{AuthorModel, CatalogBookModel, LibrarianModel, LibraryModel},
    TestContext,
};

impl TestContext {
    pub fn catalog<'a>(&'a self) -> CatalogFixtures<'a> {
        CatalogFixtures { setup: self }
    }
}

pub struct CatalogFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> CatalogFixtures<'a> {
    pub async fn insert_author(&self, name: &str) -> Result<AuthorModel, TestError> {
        Ok(
            entity::prelude::Author::insert(entity::author::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_book(
        &self,
        title: &str,
        author_id: i32,
    ) -> Result<CatalogBookModel, TestError> {
        Ok(
            entity::prelude::CatalogBook::insert(entity::catalog_book::ActiveModel {
                title: ActiveValue::Set(title.to_string()),
                author_id: ActiveValue::Set(author_id),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_library(&self, name: &str) -> Result<LibraryModel, TestError> {
        Ok(
            entity::prelude::Library::insert(entity::library::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Link a catalog book into a library's collection.
    pub async fn add_to_library(&self, library_id: i32, book_id: i32) -> Result<(), TestError> {
        entity::prelude::LibraryBook::insert(entity::library_book::ActiveModel {
            library_id: ActiveValue::Set(library_id),
            book_id: ActiveValue::Set(book_id),
        })
        .exec_without_returning(&self.setup.db)
        .await?;

        Ok(())
    }

    pub async fn insert_librarian(
        &self,
        name: &str,
        library_id: i32,
    ) -> Result<LibrarianModel, TestError> {
        Ok(
            entity::prelude::Librarian::insert(entity::librarian::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                library_id: ActiveValue::Set(library_id),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
