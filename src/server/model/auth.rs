//! Authenticated user and authorization policies.

use std::collections::HashSet;

use entity::sea_orm_active_enums::{Permission, Role};

use crate::server::model::db::UserModel;

/// A user loaded for a request together with everything needed to authorize it.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user: UserModel,
    /// Role from the user's profile, `None` when the profile is missing
    pub role: Option<Role>,
    permissions: HashSet<Permission>,
}

impl AuthUser {
    /// # Arguments
    /// - `user` - The account
    /// - `role` - Profile role if a profile exists
    /// - `permissions` - Direct and group permissions combined
    pub fn new(user: UserModel, role: Option<Role>, permissions: HashSet<Permission>) -> Self {
        Self {
            user,
            role,
            permissions,
        }
    }

    pub fn id(&self) -> i32 {
        self.user.id
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// Active superusers hold every permission, inactive users hold none.
    pub fn has_perm(&self, permission: Permission) -> bool {
        if !self.user.is_active {
            return false;
        }

        self.user.is_superuser || self.permissions.contains(&permission)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.user.is_active && self.role == Some(role)
    }

    pub fn is_staff(&self) -> bool {
        self.user.is_active && self.user.is_staff
    }

    pub fn permits<P: Policy + ?Sized>(&self, policy: &P) -> bool {
        policy.permits(self)
    }
}

/// A check an authenticated user must pass to reach a resource.
pub trait Policy {
    fn permits(&self, user: &AuthUser) -> bool;
}

impl Policy for Permission {
    fn permits(&self, user: &AuthUser) -> bool {
        user.has_perm(*self)
    }
}

impl Policy for Role {
    fn permits(&self, user: &AuthUser) -> bool {
        user.has_role(*self)
    }
}

/// Admin surface access
pub struct Staff;

impl Policy for Staff {
    fn permits(&self, user: &AuthUser) -> bool {
        user.is_staff()
    }
}
