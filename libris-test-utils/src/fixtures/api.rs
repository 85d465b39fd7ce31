//! API book fixture utilities.

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::ApiBookModel, TestContext};

impl TestContext {
    pub fn api<'a>(&'a self) -> ApiFixtures<'a> {
        ApiFixtures { setup: self }
    }
}

pub struct ApiFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> ApiFixtures<'a> {
    pub async fn insert_api_book(
        &self,
        title: &str,
        author: &str,
    ) -> Result<ApiBookModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::ApiBook::insert(entity::api_book::ActiveModel {
                title: ActiveValue::Set(title.to_string()),
                author: ActiveValue::Set(author.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
