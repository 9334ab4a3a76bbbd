/// Middleware for the API server
///
/// - `auth`: Bearer token authentication for protected routes
/// - `security`: Security response headers

pub mod auth;
pub mod security;
