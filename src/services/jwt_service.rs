//! Servicio JWT
//!
//! Emisión y validación de tokens HS256 con el claim de email verificado
//! que consumen la autorización de admins y la aceptación de invitaciones.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::models::auth::JwtClaims;
use crate::utils::errors::AppError;

pub struct JwtService {
    algorithm: Algorithm,
    token_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            token_duration: Duration::hours(expiration_hours),
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Genera un token de acceso para el usuario
    pub fn generate_token(
        &self,
        user_id: &str,
        email: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_duration;

        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_lowercase(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("Error generating token: {}", e)))?;

        Ok((token, expires_at))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(self.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Jwt(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_validate_token() {
        let jwt_service = JwtService::new("test-secret", 24);

        let (token, expires_at) = jwt_service
            .generate_token("user-123", "Alice@Example.com")
            .unwrap();
        assert!(!token.is_empty());
        assert!(expires_at > Utc::now());

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
        // El claim de email se normaliza a minúsculas al emitir
        assert_eq!(claims.email, "alice@example.com");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", 24);
        let verifier = JwtService::new("secret-b", 24);

        let (token, _) = issuer.generate_token("user-123", "a@b.com").unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt_service = JwtService::new("test-secret", 24);
        assert!(jwt_service.validate_token("not-a-jwt").is_err());
    }
}
