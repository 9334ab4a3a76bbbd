/// API route handlers, one module per resource
///
/// - `health`: Banner and health check (public)
/// - `auth`: Register, login, refresh (public)
/// - `todos`: Todo CRUD
/// - `categories`: Category CRUD
/// - `admin`: User management

pub mod admin;
pub mod auth;
pub mod categories;
pub mod health;
pub mod todos;
