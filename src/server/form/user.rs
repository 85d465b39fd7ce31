use chrono::NaiveDate;
use entity::sea_orm_active_enums::Role;
use serde::{Deserialize, Serialize};

use crate::server::{
    form::{password::validate_password, FormErrors, REQUIRED},
    model::{
        db::UserModel,
        user::{NewUser, UserChanges},
    },
};

pub const MAX_USERNAME_CHARS: usize = 150;
pub const MAX_NAME_CHARS: usize = 150;

/// Registration and admin "add user" form
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserCreationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// `YYYY-MM-DD`, may be blank
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl UserCreationForm {
    /// Validate everything but username uniqueness, which needs the database.
    pub fn validate(&self) -> Result<NewUser, FormErrors> {
        let mut errors = FormErrors::default();

        let username = clean_username(&mut errors, &self.username);
        let email = clean_email(&mut errors, "email", &self.email, false);
        let first_name = clean_name(&mut errors, "first_name", &self.first_name);
        let last_name = clean_name(&mut errors, "last_name", &self.last_name);
        let date_of_birth = clean_date(&mut errors, "date_of_birth", &self.date_of_birth);

        if self.password1.is_empty() {
            errors.add("password1", REQUIRED);
        }

        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        } else if !self.password1.is_empty() && self.password1 != self.password2 {
            errors.add("password2", "Passwords don't match");
        } else if !self.password1.is_empty() {
            for message in validate_password(&self.password2, &username) {
                errors.add("password2", message);
            }
        }

        errors.into_result(NewUser {
            username,
            email,
            first_name,
            last_name,
            date_of_birth,
            password: self.password1.clone(),
        })
    }
}

/// Login form; `next` carries the page to return to
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.username.trim().is_empty() {
            errors.add("username", REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }

        errors.into_result(())
    }
}

/// Admin "change user" form. Checkboxes are only present when ticked.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserChangeForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    pub is_active: Option<String>,
    pub is_staff: Option<String>,
    #[serde(default)]
    pub role: String,
}

impl UserChangeForm {
    pub fn from_model(user: &UserModel, role: Option<Role>) -> Self {
        let checked = |flag: bool| flag.then(|| "on".to_string());

        Self {
            email: user.email.clone().unwrap_or_default(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            date_of_birth: user
                .date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            is_active: checked(user.is_active),
            is_staff: checked(user.is_staff),
            role: role_name(role.unwrap_or(Role::Member)).to_string(),
        }
    }

    pub fn validate(&self) -> Result<UserChanges, FormErrors> {
        let mut errors = FormErrors::default();

        let email = clean_email(&mut errors, "email", &self.email, false);
        let first_name = clean_name(&mut errors, "first_name", &self.first_name);
        let last_name = clean_name(&mut errors, "last_name", &self.last_name);
        let date_of_birth = clean_date(&mut errors, "date_of_birth", &self.date_of_birth);

        let role = parse_role(&self.role);
        if role.is_none() {
            errors.add("role", "Select a valid choice.");
        }

        errors.into_result(UserChanges {
            email,
            first_name,
            last_name,
            date_of_birth,
            is_active: self.is_active.is_some(),
            is_staff: self.is_staff.is_some(),
            role: role.unwrap_or(Role::Member),
        })
    }
}

pub fn role_name(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Librarian => "Librarian",
        Role::Member => "Member",
    }
}

pub fn parse_role(value: &str) -> Option<Role> {
    match value.trim() {
        "Admin" => Some(Role::Admin),
        "Librarian" => Some(Role::Librarian),
        "Member" => Some(Role::Member),
        _ => None,
    }
}

fn clean_username(errors: &mut FormErrors, value: &str) -> String {
    let value = value.trim();

    if value.is_empty() {
        errors.add("username", REQUIRED);
    } else if value.chars().count() > MAX_USERNAME_CHARS {
        errors.add(
            "username",
            format!(
                "Ensure this value has at most {} characters.",
                MAX_USERNAME_CHARS
            ),
        );
    } else if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }

    value.to_string()
}

fn clean_name(errors: &mut FormErrors, field: &str, value: &str) -> String {
    let value = value.trim();

    if value.chars().count() > MAX_NAME_CHARS {
        errors.add(
            field,
            format!("Ensure this value has at most {} characters.", MAX_NAME_CHARS),
        );
    }

    value.to_string()
}

fn clean_date(errors: &mut FormErrors, field: &str, value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Enter a valid date.");
            None
        }
    }
}

/// Validate an email address of the form `local@domain.tld`.
///
/// The domain part is lower-cased. Returns `None` for a blank optional value or an
/// invalid address.
pub(crate) fn clean_email(
    errors: &mut FormErrors,
    field: &str,
    value: &str,
    required: bool,
) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        if required {
            errors.add(field, REQUIRED);
        }
        return None;
    }

    match normalize_email(value) {
        Some(email) => Some(email),
        None => {
            errors.add(field, "Enter a valid email address.");
            None
        }
    }
}

/// Lower-case the domain of a syntactically valid address
pub fn normalize_email(value: &str) -> Option<String> {
    let (local, domain) = value.trim().rsplit_once('@')?;

    let valid_local = !local.is_empty() && !local.contains(char::is_whitespace);
    let valid_domain = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
        && domain
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');

    (valid_local && valid_domain).then(|| format!("{}@{}", local, domain.to_lowercase()))
}
