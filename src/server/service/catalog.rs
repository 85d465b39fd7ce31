use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::catalog::{
        author::AuthorRepository, book::CatalogBookRepository, librarian::LibrarianRepository,
        library::LibraryRepository,
    },
    error::Error,
    model::db::{AuthorModel, CatalogBookModel, LibrarianModel, LibraryModel},
};

/// A catalog book with its author, if the author row still exists
pub type BookWithAuthor = (CatalogBookModel, Option<AuthorModel>);

/// A library with its collection and librarian.
#[derive(Clone, Debug)]
pub struct LibraryDetail {
    pub library: LibraryModel,
    pub books: Vec<BookWithAuthor>,
    pub librarian: Option<LibrarianModel>,
}

/// Outcome of looking up the librarian of a library by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibrarianLookup {
    Found(LibrarianModel),
    /// The library exists but nobody is assigned to it
    NoLibrarian(LibraryModel),
    LibraryNotFound,
}

pub static SAMPLE_AUTHOR: &str = "J.K. Rowling";
pub static SAMPLE_LIBRARY: &str = "Central Library";
pub static SAMPLE_LIBRARIAN: &str = "Alice Johnson";
pub static SAMPLE_TITLES: [&str; 2] = [
    "Harry Potter and the Philosopher's Stone",
    "Harry Potter and the Chamber of Secrets",
];

/// Authors, catalog books, libraries and librarians.
pub struct CatalogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CatalogService<'a> {
    /// Creates a new instance of [`CatalogService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All catalog books with their authors ordered by title
    pub async fn list_books(&self) -> Result<Vec<BookWithAuthor>, Error> {
        Ok(CatalogBookRepository::new(self.db)
            .list_with_author(None, None)
            .await?)
    }

    pub async fn get_book(&self, book_id: i32) -> Result<Option<BookWithAuthor>, Error> {
        Ok(CatalogBookRepository::new(self.db)
            .get_with_author(book_id)
            .await?)
    }

    /// Loads a library with its books and librarian.
    ///
    /// # Arguments
    /// - `library_id` - Library to load, `None` loads the library with the lowest ID
    ///
    /// # Returns
    /// - `Ok(Some(LibraryDetail))` - The library was found
    /// - `Ok(None)` - No such library, or no library at all when `library_id` is `None`
    pub async fn library_detail(
        &self,
        library_id: Option<i32>,
    ) -> Result<Option<LibraryDetail>, Error> {
        let library_repo = LibraryRepository::new(self.db);

        let library = match library_id {
            Some(id) => library_repo.get(id).await?,
            None => library_repo.first().await?,
        };
        let Some(library) = library else {
            return Ok(None);
        };

        let books = library_repo.books(&library).await?;
        let librarian = LibrarianRepository::new(self.db)
            .for_library(library.id)
            .await?;

        Ok(Some(LibraryDetail {
            library,
            books,
            librarian,
        }))
    }

    /// Adds a book, fetching or creating its author by name.
    pub async fn add_book(
        &self,
        title: &str,
        author_name: &str,
    ) -> Result<CatalogBookModel, Error> {
        let txn = self.db.begin().await?;

        let author = AuthorRepository::new(&txn).get_or_create(author_name).await?;
        let book = CatalogBookRepository::new(&txn)
            .create(title, author.id)
            .await?;

        txn.commit().await?;

        tracing::info!(book_id = book.id, title = %book.title, "added catalog book");

        Ok(book)
    }

    /// Changes a book's title and author, fetching or creating the author by name.
    ///
    /// Returns `Ok(None)` if the book does not exist.
    pub async fn edit_book(
        &self,
        book_id: i32,
        title: &str,
        author_name: &str,
    ) -> Result<Option<CatalogBookModel>, Error> {
        let txn = self.db.begin().await?;

        let book_repo = CatalogBookRepository::new(&txn);
        if book_repo.get(book_id).await?.is_none() {
            return Ok(None);
        }

        let author = AuthorRepository::new(&txn).get_or_create(author_name).await?;
        let book = book_repo.update(book_id, title, author.id).await?;

        txn.commit().await?;

        Ok(book)
    }

    /// Deletes a book and returns it as it was, `Ok(None)` if it did not exist.
    pub async fn delete_book(&self, book_id: i32) -> Result<Option<CatalogBookModel>, Error> {
        let book_repo = CatalogBookRepository::new(self.db);

        let Some(book) = book_repo.get(book_id).await? else {
            return Ok(None);
        };
        book_repo.delete(book.id).await?;

        tracing::info!(book_id = book.id, title = %book.title, "deleted catalog book");

        Ok(Some(book))
    }

    /// Admin changelist of catalog books.
    ///
    /// # Arguments
    /// - `search` - Matches the title or the author's name
    /// - `author_id` - Only include books by this author
    pub async fn search_books(
        &self,
        search: Option<&str>,
        author_id: Option<i32>,
    ) -> Result<Vec<BookWithAuthor>, Error> {
        Ok(CatalogBookRepository::new(self.db)
            .list_with_author(search, author_id)
            .await?)
    }

    pub async fn authors(&self, search: Option<&str>) -> Result<Vec<AuthorModel>, Error> {
        Ok(AuthorRepository::new(self.db).list(search).await?)
    }

    pub async fn libraries(&self, search: Option<&str>) -> Result<Vec<LibraryModel>, Error> {
        Ok(LibraryRepository::new(self.db).list(search).await?)
    }

    /// Librarians with the library they run
    pub async fn librarians(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<(LibrarianModel, Option<LibraryModel>)>, Error> {
        Ok(LibrarianRepository::new(self.db).list(search).await?)
    }

    /// Books by the author with exactly this name, `Ok(None)` for an unknown author.
    pub async fn books_by_author(
        &self,
        author_name: &str,
    ) -> Result<Option<Vec<CatalogBookModel>>, Error> {
        let Some(author) = AuthorRepository::new(self.db)
            .find_by_name(author_name)
            .await?
        else {
            return Ok(None);
        };

        let books = CatalogBookRepository::new(self.db)
            .by_author(author.id)
            .await?;

        Ok(Some(books))
    }

    /// Books held by the library with exactly this name, `Ok(None)` for an unknown library.
    pub async fn books_in_library(
        &self,
        library_name: &str,
    ) -> Result<Option<Vec<BookWithAuthor>>, Error> {
        let library_repo = LibraryRepository::new(self.db);

        let Some(library) = library_repo.find_by_name(library_name).await? else {
            return Ok(None);
        };

        Ok(Some(library_repo.books(&library).await?))
    }

    /// Looks up the librarian of the library with exactly this name.
    pub async fn librarian_for_library(
        &self,
        library_name: &str,
    ) -> Result<LibrarianLookup, Error> {
        let Some(library) = LibraryRepository::new(self.db)
            .find_by_name(library_name)
            .await?
        else {
            return Ok(LibrarianLookup::LibraryNotFound);
        };

        let lookup = match LibrarianRepository::new(self.db)
            .for_library(library.id)
            .await?
        {
            Some(librarian) => LibrarianLookup::Found(librarian),
            None => LibrarianLookup::NoLibrarian(library),
        };

        Ok(lookup)
    }

    /// Ensures the sample author, books, library and librarian exist.
    ///
    /// Existing rows are reused, so running this repeatedly creates nothing new.
    pub async fn seed_samples(&self) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let author = AuthorRepository::new(&txn).get_or_create(SAMPLE_AUTHOR).await?;

        let book_repo = CatalogBookRepository::new(&txn);
        let existing = book_repo.by_author(author.id).await?;
        let mut book_ids = Vec::new();
        for title in SAMPLE_TITLES {
            let book = match existing.iter().find(|book| book.title == title) {
                Some(book) => book.clone(),
                None => book_repo.create(title, author.id).await?,
            };
            book_ids.push(book.id);
        }

        let library_repo = LibraryRepository::new(&txn);
        let library = match library_repo.find_by_name(SAMPLE_LIBRARY).await? {
            Some(library) => library,
            None => library_repo.create(SAMPLE_LIBRARY).await?,
        };

        let held: Vec<i32> = library_repo
            .books(&library)
            .await?
            .into_iter()
            .map(|(book, _)| book.id)
            .collect();
        for book_id in book_ids {
            if !held.contains(&book_id) {
                library_repo.add_book(library.id, book_id).await?;
            }
        }

        let librarian_repo = LibrarianRepository::new(&txn);
        if librarian_repo.for_library(library.id).await?.is_none() {
            librarian_repo.create(SAMPLE_LIBRARIAN, library.id).await?;
        }

        txn.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    mod library_detail {
        use libris_test_utils::prelude::*;

        use crate::server::service::catalog::CatalogService;

        /// Expect the first library when no ID is given
        #[tokio::test]
        async fn defaults_to_first_library() -> Result<(), TestError> {
            let test = TestBuilder::new().with_catalog_tables().build().await?;
            let first = test.catalog().insert_library("Central Library").await?;
            test.catalog().insert_library("Branch Library").await?;
            test.catalog().insert_librarian("Alice Johnson", first.id).await?;

            let catalog_service = CatalogService::new(&test.db);
            let detail = catalog_service.library_detail(None).await.unwrap().unwrap();

            assert_eq!(detail.library.id, first.id);
            assert_eq!(detail.librarian.map(|l| l.name).as_deref(), Some("Alice Johnson"));

            Ok(())
        }

        /// Expect Ok(None) for a missing library ID
        #[tokio::test]
        async fn returns_none_for_missing_library() -> Result<(), TestError> {
            let test = TestBuilder::new().with_catalog_tables().build().await?;

            let catalog_service = CatalogService::new(&test.db);

            assert!(catalog_service.library_detail(Some(7)).await.unwrap().is_none());

            Ok(())
        }
    }

    mod add_book {
        use libris_test_utils::prelude::*;

        use crate::server::{
            data::catalog::author::AuthorRepository, service::catalog::CatalogService,
        };

        /// Expect the author to be reused across books
        #[tokio::test]
        async fn reuses_author_by_name() -> Result<(), TestError> {
            let test = TestBuilder::new().with_catalog_tables().build().await?;

            let catalog_service = CatalogService::new(&test.db);
            let first = catalog_service.add_book("Emma", "Jane Austen").await.unwrap();
            let second = catalog_service.add_book("Persuasion", "Jane Austen").await.unwrap();

            assert_eq!(first.author_id, second.author_id);
            assert_eq!(AuthorRepository::new(&test.db).list(None).await?.len(), 1);

            Ok(())
        }
    }

    mod edit_book {
        use libris_test_utils::prelude::*;

        use crate::server::service::catalog::CatalogService;

        #[tokio::test]
        async fn returns_none_for_missing_book() -> Result<(), TestError> {
            let test = TestBuilder::new().with_catalog_tables().build().await?;

            let catalog_service = CatalogService::new(&test.db);
            let result = catalog_service.edit_book(1, "Emma", "Jane Austen").await.unwrap();

            assert!(result.is_none());

            Ok(())
        }
    }

    mod librarian_for_library {
        use libris_test_utils::prelude::*;

        use crate::server::service::catalog::{CatalogService, LibrarianLookup};

        /// Expect a missing library to be told apart from a library without librarian
        #[tokio::test]
        async fn distinguishes_missing_library_and_librarian() -> Result<(), TestError> {
            let test = TestBuilder::new().with_catalog_tables().build().await?;
            test.catalog().insert_library("Branch Library").await?;

            let catalog_service = CatalogService::new(&test.db);

            assert_eq!(
                catalog_service.librarian_for_library("Nowhere").await.unwrap(),
                LibrarianLookup::LibraryNotFound
            );
            assert!(matches!(
                catalog_service.librarian_for_library("Branch Library").await.unwrap(),
                LibrarianLookup::NoLibrarian(_)
            ));

            Ok(())
        }
    }

    mod seed_samples {
        use libris_test_utils::prelude::*;

        use crate::server::service::catalog::{
            CatalogService, LibrarianLookup, SAMPLE_AUTHOR, SAMPLE_LIBRARY,
        };

        /// Expect seeding twice to leave exactly the sample rows
        #[tokio::test]
        async fn is_idempotent() -> Result<(), TestError> {
            let test = TestBuilder::new().with_catalog_tables().build().await?;

            let catalog_service = CatalogService::new(&test.db);
            catalog_service.seed_samples().await.unwrap();
            catalog_service.seed_samples().await.unwrap();

            let by_author = catalog_service.books_by_author(SAMPLE_AUTHOR).await.unwrap();
            assert_eq!(by_author.map(|books| books.len()), Some(2));
            let in_library = catalog_service.books_in_library(SAMPLE_LIBRARY).await.unwrap();
            assert_eq!(in_library.map(|books| books.len()), Some(2));
            assert!(matches!(
                catalog_service.librarian_for_library(SAMPLE_LIBRARY).await.unwrap(),
                LibrarianLookup::Found(_)
            ));

            Ok(())
        }
    }
}
