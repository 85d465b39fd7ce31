use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_custom_user_table::CustomUser;

static FK_USER_PERMISSION_USER_ID: &str = "fk_user_permission_user_id";
static FK_GROUP_PERMISSION_GROUP_ID: &str = "fk_group_permission_group_id";
static FK_USER_GROUP_USER_ID: &str = "fk_user_group_user_id";
static FK_USER_GROUP_GROUP_ID: &str = "fk_user_group_group_id";

static IDX_USER_PERMISSION_UNIQUE: &str = "idx_user_permission_user_id_permission";
static IDX_GROUP_PERMISSION_UNIQUE: &str = "idx_group_permission_group_id_permission";
static IDX_USER_GROUP_UNIQUE: &str = "idx_user_group_user_id_group_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPermission::Table)
                    .if_not_exists()
                    .col(pk_auto(UserPermission::Id))
                    .col(integer(UserPermission::UserId))
                    .col(string(UserPermission::Permission))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_PERMISSION_USER_ID)
                            .from(UserPermission::Table, UserPermission::UserId)
                            .to(CustomUser::Table, CustomUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_PERMISSION_UNIQUE)
                    .table(UserPermission::Table)
                    .col(UserPermission::UserId)
                    .col(UserPermission::Permission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuthGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthGroup::Id))
                    .col(string_uniq(AuthGroup::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupPermission::Table)
                    .if_not_exists()
                    .col(pk_auto(GroupPermission::Id))
                    .col(integer(GroupPermission::GroupId))
                    .col(string(GroupPermission::Permission))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_PERMISSION_GROUP_ID)
                            .from(GroupPermission::Table, GroupPermission::GroupId)
                            .to(AuthGroup::Table, AuthGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GROUP_PERMISSION_UNIQUE)
                    .table(GroupPermission::Table)
                    .col(GroupPermission::GroupId)
                    .col(GroupPermission::Permission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(UserGroup::Id))
                    .col(integer(UserGroup::UserId))
                    .col(integer(UserGroup::GroupId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_GROUP_USER_ID)
                            .from(UserGroup::Table, UserGroup::UserId)
                            .to(CustomUser::Table, CustomUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_GROUP_GROUP_ID)
                            .from(UserGroup::Table, UserGroup::GroupId)
                            .to(AuthGroup::Table, AuthGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_GROUP_UNIQUE)
                    .table(UserGroup::Table)
                    .col(UserGroup::UserId)
                    .col(UserGroup::GroupId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserGroup::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GroupPermission::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AuthGroup::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UserPermission::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserPermission {
    Table,
    Id,
    UserId,
    Permission,
}

#[derive(DeriveIden)]
pub enum AuthGroup {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum GroupPermission {
    Table,
    Id,
    GroupId,
    Permission,
}

#[derive(DeriveIden)]
pub enum UserGroup {
    Table,
    Id,
    UserId,
    GroupId,
}
