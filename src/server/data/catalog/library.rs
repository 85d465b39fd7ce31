use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    data::icontains,
    model::db::{AuthorModel, CatalogBookModel, LibraryModel},
};

pub struct LibraryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LibraryRepository<'a, C> {
    /// Creates a new instance of [`LibraryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str) -> Result<LibraryModel, DbErr> {
        entity::library::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, library_id: i32) -> Result<Option<LibraryModel>, DbErr> {
        entity::prelude::Library::find_by_id(library_id)
            .one(self.db)
            .await
    }

    /// The library with the lowest id
    pub async fn first(&self) -> Result<Option<LibraryModel>, DbErr> {
        entity::prelude::Library::find()
            .order_by_asc(entity::library::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<LibraryModel>, DbErr> {
        entity::prelude::Library::find()
            .filter(entity::library::Column::Name.eq(name))
            .order_by_asc(entity::library::Column::Id)
            .one(self.db)
            .await
    }

    /// Lists libraries ordered by name, optionally matching `search`
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<LibraryModel>, DbErr> {
        let mut query =
            entity::prelude::Library::find().order_by_asc(entity::library::Column::Name);

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query = query.filter(icontains(entity::library::Column::Name, search));
        }

        query.all(self.db).await
    }

    /// Books held by the library with their authors, ordered by title
    pub async fn books(
        &self,
        library: &LibraryModel,
    ) -> Result<Vec<(CatalogBookModel, Option<AuthorModel>)>, DbErr> {
        library
            .find_related(entity::catalog_book::Entity)
            .find_also_related(entity::author::Entity)
            .order_by_asc(entity::catalog_book::Column::Title)
            .all(self.db)
            .await
    }

    /// Adds a book to the library's collection
    pub async fn add_book(&self, library_id: i32, book_id: i32) -> Result<(), DbErr> {
        entity::prelude::LibraryBook::insert(entity::library_book::ActiveModel {
            library_id: ActiveValue::Set(library_id),
            book_id: ActiveValue::Set(book_id),
        })
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }
}
