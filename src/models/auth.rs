//! Modelos de autenticación
//!
//! Usuario del proveedor de identidad y claims del JWT. La autorización de
//! administrador se resuelve aparte, contra la allowlist y la tabla admins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Usuario registrado - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // user_id
    pub email: String, // claim verificado que consumen autorización e invites
    pub exp: i64,      // expiration timestamp
    pub iat: i64,      // issued at timestamp
}

/// Identidad autenticada extraída del token, inyectada en los handlers
/// vía request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}
