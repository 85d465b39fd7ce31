use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    data::icontains,
    model::db::{LibrarianModel, LibraryModel},
};

pub struct LibrarianRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LibrarianRepository<'a, C> {
    /// Creates a new instance of [`LibrarianRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Assigns a new librarian to a library
    ///
    /// Fails if the library already has a librarian.
    pub async fn create(&self, name: &str, library_id: i32) -> Result<LibrarianModel, DbErr> {
        entity::librarian::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            library_id: ActiveValue::Set(library_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// The librarian assigned to a library, if any
    pub async fn for_library(&self, library_id: i32) -> Result<Option<LibrarianModel>, DbErr> {
        entity::prelude::Librarian::find()
            .filter(entity::librarian::Column::LibraryId.eq(library_id))
            .one(self.db)
            .await
    }

    /// Lists librarians with their library ordered by name
    pub async fn list(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<(LibrarianModel, Option<LibraryModel>)>, DbErr> {
        let mut query = entity::prelude::Librarian::find()
            .find_also_related(entity::library::Entity)
            .order_by_asc(entity::librarian::Column::Name);

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query = query.filter(icontains(entity::librarian::Column::Name, search));
        }

        query.all(self.db).await
    }
}

#[cfg(test)]
mod tests {
    mod for_library {
        use libris_test_utils::prelude::*;

        use crate::server::data::catalog::librarian::LibrarianRepository;

        /// Expect Ok(None) for a library nobody is assigned to
        #[tokio::test]
        async fn distinguishes_assigned_and_unassigned() -> Result<(), TestError> {
            let test = TestBuilder::new().with_catalog_tables().build().await?;
            let staffed = test.catalog().insert_library("Central Library").await?;
            let unstaffed = test.catalog().insert_library("Branch Library").await?;
            test.catalog().insert_librarian("Alice Johnson", staffed.id).await?;

            let librarian_repo = LibrarianRepository::new(&test.db);

            let librarian = librarian_repo.for_library(staffed.id).await?;
            assert_eq!(librarian.map(|l| l.name), Some("Alice Johnson".to_string()));
            assert!(librarian_repo.for_library(unstaffed.id).await?.is_none());

            Ok(())
        }
    }
}
