//! # Todo API Server Library
//!
//! HTTP layer of the todo service: role-based access to todos, categories
//! and user administration.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `bootstrap`: Admin account ensured at startup
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors (validated JSON, pagination, path ids)
//! - `middleware`: Bearer authentication and security headers
//! - `routes`: API route handlers

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
