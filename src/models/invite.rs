//! Modelo de Invite
//!
//! Invitaciones de administrador: token aleatorio de un solo uso con
//! caducidad. La validación de aceptación es pura para poder testearla
//! sin base de datos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Rol concedido al aceptar una invitación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(AdminRole::Admin),
            "super_admin" => Some(AdminRole::SuperAdmin),
            _ => None,
        }
    }
}

/// Invite - mapea exactamente a la tabla invites
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invite {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub token: String,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Reglas de aceptación, en orden: usada, caducada, email distinto.
    /// La comparación de emails es case-insensitive.
    pub fn validate_acceptance(
        &self,
        authenticated_email: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if self.used {
            return Err(AppError::InviteAlreadyUsed);
        }
        if now > self.expires_at {
            return Err(AppError::InviteExpired);
        }
        if !self.email.eq_ignore_ascii_case(authenticated_email) {
            return Err(AppError::EmailMismatch);
        }
        Ok(())
    }
}

/// Admin autorizado - mapea a la tabla admins, clave primaria el email
/// en minúsculas.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub email: String,
    pub role: String,
    pub invited_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invite(used: bool, expires_in_hours: i64) -> Invite {
        Invite {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            role: "admin".to_string(),
            token: "tok".to_string(),
            used,
            expires_at: Utc::now() + Duration::hours(expires_in_hours),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_accept_ok_case_insensitive() {
        let inv = invite(false, 48);
        assert!(inv.validate_acceptance("Alice@Example.COM", Utc::now()).is_ok());
    }

    #[test]
    fn test_accept_email_mismatch() {
        let inv = invite(false, 48);
        let err = inv
            .validate_acceptance("bob@example.com", Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::EmailMismatch));
    }

    #[test]
    fn test_accept_already_used() {
        let inv = invite(true, 48);
        let err = inv
            .validate_acceptance("alice@example.com", Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::InviteAlreadyUsed));
    }

    #[test]
    fn test_accept_expired() {
        let inv = invite(false, -1);
        let err = inv
            .validate_acceptance("alice@example.com", Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::InviteExpired));
    }

    #[test]
    fn test_used_wins_over_expired() {
        // Una invitación usada y caducada reporta "usada"
        let inv = invite(true, -1);
        let err = inv
            .validate_acceptance("alice@example.com", Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::InviteAlreadyUsed));
    }

    #[test]
    fn test_admin_role_round_trip() {
        assert_eq!(AdminRole::from_str("admin").unwrap().as_str(), "admin");
        assert_eq!(
            AdminRole::from_str("super_admin").unwrap().as_str(),
            "super_admin"
        );
        assert!(AdminRole::from_str("root").is_none());
    }
}
