pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_custom_user_table;
mod m20250301_000002_create_user_profile_table;
mod m20250301_000003_create_permission_tables;
mod m20250301_000004_create_auth_token_table;
mod m20250301_000005_create_book_table;
mod m20250301_000006_create_catalog_tables;
mod m20250301_000007_create_api_book_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_custom_user_table::Migration),
            Box::new(m20250301_000002_create_user_profile_table::Migration),
            Box::new(m20250301_000003_create_permission_tables::Migration),
            Box::new(m20250301_000004_create_auth_token_table::Migration),
            Box::new(m20250301_000005_create_book_table::Migration),
            Box::new(m20250301_000006_create_catalog_tables::Migration),
            Box::new(m20250301_000007_create_api_book_table::Migration),
        ]
    }
}
