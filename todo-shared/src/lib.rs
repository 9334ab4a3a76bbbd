//! # Todo Shared Library
//!
//! Types and business logic shared by the todo API server and its tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their queries
//! - `auth`: Authentication and role-based authorization
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
