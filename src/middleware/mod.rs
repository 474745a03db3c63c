//! Middleware del sistema
//!
//! Autenticación, autorización de admins y CORS.

pub mod auth;
pub mod cors;
