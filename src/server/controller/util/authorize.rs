//! Authorization guards for page handlers.
//!
//! Permission checks fail with 403 whether or not anyone is logged in. Login, role and
//! staff checks send the visitor to the login page with `next` set to the current URL.

use axum::http::Uri;
use entity::sea_orm_active_enums::{Permission, Role};

use crate::server::{
    error::{auth::AuthError, Error},
    model::auth::{AuthUser, Policy, Staff},
};

/// Path and query of the current request, used as the post-login target
pub fn next_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Requires a user holding `permission`.
///
/// # Returns
/// - `Ok(&AuthUser)` - The user holds the permission
/// - `Err(Error::AuthError(AuthError::PermissionDenied))` - Anonymous or missing permission
pub fn require_permission(
    user: Option<&AuthUser>,
    permission: Permission,
) -> Result<&AuthUser, Error> {
    match user {
        Some(user) if user.permits(&permission) => Ok(user),
        _ => {
            tracing::warn!(
                target: "security",
                user = user.map(AuthUser::username).unwrap_or("anonymous"),
                permission = ?permission,
                "permission denied"
            );

            Err(AuthError::PermissionDenied(permission).into())
        }
    }
}

/// Requires a user passing `policy`, otherwise redirects to the login page.
fn require_policy<'u, P: Policy + ?Sized>(
    user: Option<&'u AuthUser>,
    policy: &P,
    uri: &Uri,
) -> Result<&'u AuthUser, Error> {
    match user {
        Some(user) if user.permits(policy) => Ok(user),
        _ => Err(AuthError::LoginRequired {
            next: next_path(uri),
        }
        .into()),
    }
}

pub fn require_login<'u>(user: Option<&'u AuthUser>, uri: &Uri) -> Result<&'u AuthUser, Error> {
    user.ok_or_else(|| {
        AuthError::LoginRequired {
            next: next_path(uri),
        }
        .into()
    })
}

pub fn require_role<'u>(
    user: Option<&'u AuthUser>,
    role: Role,
    uri: &Uri,
) -> Result<&'u AuthUser, Error> {
    require_policy(user, &role, uri)
}

pub fn require_staff<'u>(user: Option<&'u AuthUser>, uri: &Uri) -> Result<&'u AuthUser, Error> {
    require_policy(user, &Staff, uri)
}

/// Staff check for admin pages that additionally need a model permission
pub fn require_staff_permission<'u>(
    user: Option<&'u AuthUser>,
    permission: Permission,
    uri: &Uri,
) -> Result<&'u AuthUser, Error> {
    let user = require_staff(user, uri)?;

    require_permission(Some(user), permission)
}
