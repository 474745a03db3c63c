//! Autorización de administradores
//!
//! Un email está autorizado si aparece en la allowlist inyectada por
//! configuración o en la tabla admins. La allowlist llega por AppState,
//! no hay estado global mutable.

use sqlx::PgPool;
use std::collections::HashSet;

use crate::repositories::admin_repository::AdminRepository;
use crate::utils::errors::AppError;

pub struct AuthorizationService {
    admins: AdminRepository,
    allowlist: HashSet<String>,
}

impl AuthorizationService {
    pub fn new(pool: PgPool, allowlist: HashSet<String>) -> Self {
        Self {
            admins: AdminRepository::new(pool),
            allowlist,
        }
    }

    pub async fn is_authorized_admin(&self, email: &str) -> Result<bool, AppError> {
        if email_allowlisted(&self.allowlist, email) {
            return Ok(true);
        }
        self.admins.is_admin(email).await
    }
}

/// Comparación case-insensitive: la allowlist se guarda en minúsculas.
pub fn email_allowlisted(allowlist: &HashSet<String>, email: &str) -> bool {
    allowlist.contains(&email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowlist_is_case_insensitive() {
        let allowlist: HashSet<String> = ["owner@example.com".to_string()].into_iter().collect();
        assert!(email_allowlisted(&allowlist, "Owner@Example.COM"));
        assert!(!email_allowlisted(&allowlist, "other@example.com"));
    }
}
