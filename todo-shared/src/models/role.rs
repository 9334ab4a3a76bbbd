/// User roles (stored in the `position` column)
///
/// Every account has exactly one role. Authorization decisions in
/// [`crate::auth::authorization`] match on it exhaustively.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_position AS ENUM ('guest', 'user', 'admin');
/// ```
///
/// # Example
///
/// ```
/// use todo_shared::models::role::Role;
///
/// let role: Role = "Admin".parse().unwrap();
/// assert_eq!(role, Role::Admin);
/// assert!("superuser".parse::<Role>().is_err());
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_position", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Authenticated but may not touch todos or categories
    Guest,

    /// Regular account: reads everything, edits its own todos
    #[default]
    User,

    /// Manages users and categories, may edit any todo
    Admin,
}

/// Returned when a string is not one of the known roles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid position '{0}': expected one of guest, user, admin")]
pub struct ParseRoleError(pub String);

impl Role {
    /// All roles, lowest privilege first
    pub const ALL: [Role; 3] = [Role::Guest, Role::User, Role::Admin];

    /// Lowercase name as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!("guest".parse::<Role>().unwrap(), Role::Guest);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Guest ".parse::<Role>().unwrap(), Role::Guest);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, ParseRoleError("superuser".to_string()));
        assert!(err.to_string().contains("superuser"));

        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_as_str_roundtrips_through_parse() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn test_default_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"guest\"").unwrap();
        assert_eq!(role, Role::Guest);
        assert!(serde_json::from_str::<Role>("\"Admin\"").is_err());
    }
}
