/// Role-based authorization checks
///
/// Every check is a pure function of the caller's [`AuthContext`] (and the
/// resource when ownership matters). Handlers run the check before touching
/// the database, so a denied caller learns nothing about whether the target
/// exists.
///
/// # Permission Model
///
/// | Action                    | guest | user     | admin |
/// |---------------------------|-------|----------|-------|
/// | Read / create todos       | no    | yes      | yes   |
/// | Edit / delete a todo      | no    | own only | yes   |
/// | Read categories           | no    | yes      | yes   |
/// | Manage categories         | no    | no       | yes   |
/// | Admin endpoints           | no    | no       | yes   |
///
/// # Example
///
/// ```
/// use todo_shared::auth::authorization::{can_edit_or_delete_todo, can_read_or_create_todos};
/// use todo_shared::auth::middleware::AuthContext;
/// use todo_shared::models::role::Role;
/// use uuid::Uuid;
///
/// let auth = AuthContext::new(Uuid::new_v4(), "alice", Role::User);
/// assert!(can_read_or_create_todos(&auth).is_ok());
///
/// // Not the owner and not an admin
/// assert!(can_edit_or_delete_todo(&auth, Uuid::new_v4()).is_err());
/// ```

use uuid::Uuid;

use super::middleware::AuthContext;
use crate::models::role::Role;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    #[error("Admin access required")]
    AdminOnly,

    #[error("Guests are not allowed to access this resource")]
    GuestDenied,

    /// Caller is neither the owner nor an admin
    #[error("You can only modify your own todos")]
    NotOwner,

    #[error("You can't delete admin user")]
    ProtectedAdmin,
}

/// Requires the admin role
pub fn is_admin(auth: &AuthContext) -> Result<(), AuthzError> {
    match auth.role {
        Role::Admin => Ok(()),
        Role::User | Role::Guest => Err(AuthzError::AdminOnly),
    }
}

fn deny_guest(auth: &AuthContext) -> Result<(), AuthzError> {
    match auth.role {
        Role::Guest => Err(AuthzError::GuestDenied),
        Role::User | Role::Admin => Ok(()),
    }
}

pub fn can_read_or_create_todos(auth: &AuthContext) -> Result<(), AuthzError> {
    deny_guest(auth)
}

/// Owner or admin may modify a todo; guests never may, even their own
pub fn can_edit_or_delete_todo(auth: &AuthContext, todo_owner: Uuid) -> Result<(), AuthzError> {
    match auth.role {
        Role::Guest => Err(AuthzError::GuestDenied),
        Role::Admin => Ok(()),
        Role::User if auth.user_id == todo_owner => Ok(()),
        Role::User => Err(AuthzError::NotOwner),
    }
}

pub fn can_read_categories(auth: &AuthContext) -> Result<(), AuthzError> {
    deny_guest(auth)
}

/// Create, update and delete of categories
pub fn can_manage_categories(auth: &AuthContext) -> Result<(), AuthzError> {
    is_admin(auth)
}

/// Caller must be admin and the target must not be
pub fn can_delete_user(auth: &AuthContext, target_role: Role) -> Result<(), AuthzError> {
    is_admin(auth)?;

    match target_role {
        Role::Admin => Err(AuthzError::ProtectedAdmin),
        Role::User | Role::Guest => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role) -> AuthContext {
        AuthContext::new(Uuid::new_v4(), "someone", role)
    }

    #[test]
    fn test_policy_matrix() {
        // (role, is_admin, todos, categories read, categories manage)
        let matrix = [
            (Role::Guest, false, false, false, false),
            (Role::User, false, true, true, false),
            (Role::Admin, true, true, true, true),
        ];

        for (role, admin, todos, read_categories, manage_categories) in matrix {
            let auth = ctx(role);
            assert_eq!(is_admin(&auth).is_ok(), admin, "is_admin for {}", role);
            assert_eq!(can_read_or_create_todos(&auth).is_ok(), todos, "todos for {}", role);
            assert_eq!(
                can_read_categories(&auth).is_ok(),
                read_categories,
                "read categories for {}",
                role
            );
            assert_eq!(
                can_manage_categories(&auth).is_ok(),
                manage_categories,
                "manage categories for {}",
                role
            );
        }
    }

    #[test]
    fn test_denial_reasons() {
        assert_eq!(is_admin(&ctx(Role::User)), Err(AuthzError::AdminOnly));
        assert_eq!(
            can_read_or_create_todos(&ctx(Role::Guest)),
            Err(AuthzError::GuestDenied)
        );
        assert_eq!(
            can_manage_categories(&ctx(Role::Guest)),
            Err(AuthzError::AdminOnly)
        );
    }

    #[test]
    fn test_owner_can_edit_own_todo() {
        let auth = ctx(Role::User);
        assert!(can_edit_or_delete_todo(&auth, auth.user_id).is_ok());
    }

    #[test]
    fn test_user_cannot_edit_others_todo() {
        let auth = ctx(Role::User);
        assert_eq!(
            can_edit_or_delete_todo(&auth, Uuid::new_v4()),
            Err(AuthzError::NotOwner)
        );
    }

    #[test]
    fn test_admin_can_edit_any_todo() {
        assert!(can_edit_or_delete_todo(&ctx(Role::Admin), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_guest_cannot_edit_even_own_todo() {
        let auth = ctx(Role::Guest);
        assert_eq!(
            can_edit_or_delete_todo(&auth, auth.user_id),
            Err(AuthzError::GuestDenied)
        );
    }

    #[test]
    fn test_can_delete_user() {
        let admin = ctx(Role::Admin);
        assert!(can_delete_user(&admin, Role::User).is_ok());
        assert!(can_delete_user(&admin, Role::Guest).is_ok());
        assert_eq!(
            can_delete_user(&admin, Role::Admin),
            Err(AuthzError::ProtectedAdmin)
        );

        // Non-admins are rejected before the target is considered
        assert_eq!(
            can_delete_user(&ctx(Role::User), Role::Admin),
            Err(AuthzError::AdminOnly)
        );
    }

    #[test]
    fn test_authz_error_display() {
        assert_eq!(
            AuthzError::ProtectedAdmin.to_string(),
            "You can't delete admin user"
        );
        assert!(AuthzError::AdminOnly.to_string().contains("Admin"));
    }
}
