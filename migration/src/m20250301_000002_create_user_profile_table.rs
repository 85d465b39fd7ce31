use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_custom_user_table::CustomUser;

static FK_USER_PROFILE_USER_ID: &str = "fk_user_profile_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(UserProfile::Id))
                    .col(integer_uniq(UserProfile::UserId))
                    .col(string(UserProfile::Role).default("Member"))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_PROFILE_USER_ID)
                            .from(UserProfile::Table, UserProfile::UserId)
                            .to(CustomUser::Table, CustomUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserProfile {
    Table,
    Id,
    UserId,
    Role,
}
