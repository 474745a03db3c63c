//! Controller de autenticación
//!
//! Registro y login con bcrypt; emite el JWT con el claim de email que
//! luego consumen autorización e invitaciones.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::dto::common::ApiResponse;
use crate::repositories::user_repository::UserRepository;
use crate::services::jwt_service::JwtService;
use crate::utils::errors::AppError;

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtService,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_secret: &str, jwt_expiration_hours: i64) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt: JwtService::new(jwt_secret, jwt_expiration_hours),
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                request.email.to_lowercase()
            )));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(request.email, request.full_name, password_hash)
            .await?;

        let (token, expires_at) = self.jwt.generate_token(&user.id.to_string(), &user.email)?;

        Ok(ApiResponse::success_with_message(
            AuthResponse {
                token,
                user_id: user.id.to_string(),
                email: user.email,
                expires_at: expires_at.to_rfc3339(),
            },
            "User registered".to_string(),
        ))
    }

    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let (token, expires_at) = self.jwt.generate_token(&user.id.to_string(), &user.email)?;

        Ok(ApiResponse::success(AuthResponse {
            token,
            user_id: user.id.to_string(),
            email: user.email,
            expires_at: expires_at.to_rfc3339(),
        }))
    }
}
