//! Middleware de autenticación y autorización
//!
//! `require_auth` valida el bearer token y deja la identidad en las
//! extensions de la request. `require_admin` exige además que el email del
//! claim esté autorizado (allowlist inyectada o tabla admins). Ambos corren
//! antes de cualquier mutación.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::models::auth::AuthenticatedUser;
use crate::services::authorization_service::AuthorizationService;
use crate::services::jwt_service::JwtService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extraer el token del header Authorization
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authorization header must be Bearer".to_string()))
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthenticatedUser, AppError> {
    let token = extract_bearer(headers)?;
    let jwt = JwtService::new(
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    );
    let claims = jwt.validate_token(token)?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
    })
}

/// Middleware: requiere un token válido
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Middleware: requiere un token válido de un email autorizado como admin
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, request.headers())?;

    let authorization =
        AuthorizationService::new(state.pool.clone(), state.config.admin_emails.clone());
    if !authorization.is_authorized_admin(&user.email).await? {
        return Err(AppError::Forbidden(format!(
            "'{}' is not an authorized admin",
            user.email
        )));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(extract_bearer(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer(&headers).unwrap_err(),
            AppError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc123"),
        );
        assert!(matches!(
            extract_bearer(&headers).unwrap_err(),
            AppError::Unauthorized(_)
        ));
    }
}
