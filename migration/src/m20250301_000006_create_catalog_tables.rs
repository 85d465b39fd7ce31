use sea_orm_migration::{prelude::*, schema::*};

static FK_CATALOG_BOOK_AUTHOR_ID: &str = "fk_catalog_book_author_id";
static FK_LIBRARY_BOOK_LIBRARY_ID: &str = "fk_library_book_library_id";
static FK_LIBRARY_BOOK_BOOK_ID: &str = "fk_library_book_book_id";
static FK_LIBRARIAN_LIBRARY_ID: &str = "fk_librarian_library_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Author::Table)
                    .if_not_exists()
                    .col(pk_auto(Author::Id))
                    .col(string_len(Author::Name, 100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CatalogBook::Table)
                    .if_not_exists()
                    .col(pk_auto(CatalogBook::Id))
                    .col(string_len(CatalogBook::Title, 200))
                    .col(integer(CatalogBook::AuthorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CATALOG_BOOK_AUTHOR_ID)
                            .from(CatalogBook::Table, CatalogBook::AuthorId)
                            .to(Author::Table, Author::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Library::Table)
                    .if_not_exists()
                    .col(pk_auto(Library::Id))
                    .col(string_len(Library::Name, 100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LibraryBook::Table)
                    .if_not_exists()
                    .col(integer(LibraryBook::LibraryId))
                    .col(integer(LibraryBook::BookId))
                    .primary_key(
                        Index::create()
                            .col(LibraryBook::LibraryId)
                            .col(LibraryBook::BookId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LIBRARY_BOOK_LIBRARY_ID)
                            .from(LibraryBook::Table, LibraryBook::LibraryId)
                            .to(Library::Table, Library::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LIBRARY_BOOK_BOOK_ID)
                            .from(LibraryBook::Table, LibraryBook::BookId)
                            .to(CatalogBook::Table, CatalogBook::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Librarian::Table)
                    .if_not_exists()
                    .col(pk_auto(Librarian::Id))
                    .col(string_len(Librarian::Name, 100))
                    .col(integer_uniq(Librarian::LibraryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LIBRARIAN_LIBRARY_ID)
                            .from(Librarian::Table, Librarian::LibraryId)
                            .to(Library::Table, Library::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Librarian::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(LibraryBook::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Library::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CatalogBook::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Author::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Author {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum CatalogBook {
    Table,
    Id,
    Title,
    AuthorId,
}

#[derive(DeriveIden)]
pub enum Library {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum LibraryBook {
    Table,
    LibraryId,
    BookId,
}

#[derive(DeriveIden)]
pub enum Librarian {
    Table,
    Id,
    Name,
    LibraryId,
}
