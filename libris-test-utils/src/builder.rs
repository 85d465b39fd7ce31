//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! Configuration methods are chained and the queued work runs during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{constant::TEST_USERNAME, error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_tables: bool,
    include_catalog_tables: bool,
    users: Vec<String>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_user_tables: false,
            include_catalog_tables: false,
            users: Vec::new(),
        }
    }

    /// Add the account tables to the test database.
    ///
    /// Creates CustomUser, UserProfile, UserPermission, AuthGroup, GroupPermission,
    /// UserGroup and AuthToken, which every authenticated code path needs.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// Add the catalog tables (Author, CatalogBook, Library, LibraryBook, Librarian).
    pub fn with_catalog_tables(mut self) -> Self {
        self.include_catalog_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libris_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), libris_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_user_tables()
    ///     .with_table(Book)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert the default fixture user (`TEST_USERNAME`) during `build()`.
    ///
    /// Implies `with_user_tables()`.
    pub fn with_default_user(self) -> Self {
        self.with_user(TEST_USERNAME)
    }

    /// Insert an active member user with the given username during `build()`.
    ///
    /// Implies `with_user_tables()`.
    pub fn with_user(mut self, username: impl Into<String>) -> Self {
        self.include_user_tables = true;
        self.users.push(username.into());
        self
    }

    /// Build the test context.
    ///
    /// Creates the account tables, then the catalog tables, then custom tables, and
    /// finally inserts queued users.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        let mut all_tables = Vec::new();

        if self.include_user_tables {
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::CustomUser),
                schema.create_table_from_entity(entity::prelude::UserProfile),
                schema.create_table_from_entity(entity::prelude::UserPermission),
                schema.create_table_from_entity(entity::prelude::AuthGroup),
                schema.create_table_from_entity(entity::prelude::GroupPermission),
                schema.create_table_from_entity(entity::prelude::UserGroup),
                schema.create_table_from_entity(entity::prelude::AuthToken),
            ]);
        }

        if self.include_catalog_tables {
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Author),
                schema.create_table_from_entity(entity::prelude::CatalogBook),
                schema.create_table_from_entity(entity::prelude::Library),
                schema.create_table_from_entity(entity::prelude::LibraryBook),
                schema.create_table_from_entity(entity::prelude::Librarian),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for username in self.users {
            setup.user().insert_user(&username).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
