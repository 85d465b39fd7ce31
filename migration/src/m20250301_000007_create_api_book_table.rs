use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiBook::Table)
                    .if_not_exists()
                    .col(pk_auto(ApiBook::Id))
                    .col(string_len(ApiBook::Title, 200))
                    .col(string_len(ApiBook::Author, 100))
                    .col(date_time(ApiBook::CreatedAt))
                    .col(date_time(ApiBook::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiBook::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ApiBook {
    Table,
    Id,
    Title,
    Author,
    CreatedAt,
    UpdatedAt,
}
