use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomUser::Table)
                    .if_not_exists()
                    .col(pk_auto(CustomUser::Id))
                    .col(string_uniq(CustomUser::Username))
                    .col(string_null(CustomUser::Email))
                    .col(string(CustomUser::FirstName).default(""))
                    .col(string(CustomUser::LastName).default(""))
                    .col(string(CustomUser::Password))
                    .col(date_null(CustomUser::DateOfBirth))
                    .col(string_null(CustomUser::ProfilePhoto))
                    .col(boolean(CustomUser::IsStaff).default(false))
                    .col(boolean(CustomUser::IsSuperuser).default(false))
                    .col(boolean(CustomUser::IsActive).default(true))
                    .col(date_time(CustomUser::DateJoined))
                    .col(date_time_null(CustomUser::LastLogin))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CustomUser {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    Password,
    DateOfBirth,
    ProfilePhoto,
    IsStaff,
    IsSuperuser,
    IsActive,
    DateJoined,
    LastLogin,
}
