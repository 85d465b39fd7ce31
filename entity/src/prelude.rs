pub use super::api_book::Entity as ApiBook;
pub use super::auth_group::Entity as AuthGroup;
pub use super::auth_token::Entity as AuthToken;
pub use super::author::Entity as Author;
pub use super::book::Entity as Book;
pub use super::catalog_book::Entity as CatalogBook;
pub use super::custom_user::Entity as CustomUser;
pub use super::group_permission::Entity as GroupPermission;
pub use super::librarian::Entity as Librarian;
pub use super::library::Entity as Library;
pub use super::library_book::Entity as LibraryBook;
pub use super::user_group::Entity as UserGroup;
pub use super::user_permission::Entity as UserPermission;
pub use super::user_profile::Entity as UserProfile;
