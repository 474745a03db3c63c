//! Configuración de variables de entorno
//!
//! La allowlist de admins se carga aquí y se inyecta vía AppState; no hay
//! estado global mutable en el proceso.

use std::collections::HashSet;
use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub cors_origins: Vec<String>,
    /// Emails autorizados como admin además de la tabla admins, en minúsculas
    pub admin_emails: HashSet<String>,
    /// Base de los enlaces de aceptación de invitaciones
    pub public_base_url: String,
    pub invite_ttl_hours: i64,
    // API de email; sin configurar, el canal de notificaciones es un no-op
    pub email_api_url: Option<String>,
    pub email_api_key: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            host: env::var("HOST").expect("HOST must be set"),
            port: env::var("PORT")
                .expect("PORT must be set")
                .parse()
                .expect("PORT must be a valid number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration_hours: env::var("JWT_EXPIRATION")
                .expect("JWT_EXPIRATION must be set")
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .expect("CORS_ORIGINS must be set")
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            admin_emails: parse_admin_emails(
                &env::var("ADMIN_EMAILS").expect("ADMIN_EMAILS must be set"),
            ),
            public_base_url: env::var("PUBLIC_BASE_URL").expect("PUBLIC_BASE_URL must be set"),
            invite_ttl_hours: env::var("INVITE_TTL_HOURS")
                .unwrap_or_else(|_| "48".to_string())
                .parse()
                .expect("INVITE_TTL_HOURS must be a valid number"),
            email_api_url: env::var("EMAIL_API_URL").ok(),
            email_api_key: env::var("EMAIL_API_KEY").ok(),
        }
    }
}

impl EnvironmentConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Lista separada por comas -> set en minúsculas
pub fn parse_admin_emails(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_emails() {
        let set = parse_admin_emails("Owner@Example.com, second@example.com ,, ");
        assert_eq!(set.len(), 2);
        assert!(set.contains("owner@example.com"));
        assert!(set.contains("second@example.com"));
    }

    #[test]
    fn test_parse_admin_emails_empty() {
        assert!(parse_admin_emails("").is_empty());
    }
}
