use chrono::NaiveDate;
use entity::sea_orm_active_enums::Role;

use crate::server::{model::db::UserModel, util::time::age_today};

/// Age of an account holder derived from the stored date of birth
pub trait UserAge {
    /// Age in whole years as of today, `None` without a date of birth
    fn get_age(&self) -> Option<i32>;
}

impl UserAge for UserModel {
    fn get_age(&self) -> Option<i32> {
        self.date_of_birth.map(age_today)
    }
}

/// Validated registration data, password still in plain text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub password: String,
}

/// Fields an administrator may change on an existing account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub is_staff: bool,
    pub role: Role,
}

/// Admin user list search and filters, `None` means unfiltered
#[derive(Clone, Debug, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
}
