//! Flujo de invitaciones de administrador
//!
//! Crea invitaciones con token aleatorio de un solo uso y 48h de caducidad,
//! y las acepta contra el email verificado del token. Marcar la invitación
//! como usada y dar de alta al admin van en una misma transacción.

use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::invite::{Admin, AdminRole, Invite};
use crate::repositories::invite_repository::InviteRepository;
use crate::services::notification_service::Notifier;
use crate::utils::errors::AppError;

/// Longitud del token de invitación
const TOKEN_LENGTH: usize = 48;

pub struct InvitationService {
    pool: PgPool,
    invites: InviteRepository,
    notifier: Arc<dyn Notifier>,
    public_base_url: String,
    invite_ttl_hours: i64,
}

/// Resultado de crear una invitación. `email_delivered = false` no es un
/// fallo: la invitación queda persistida y el enlace se comparte a mano.
pub struct CreatedInvite {
    pub invite: Invite,
    pub accept_url: String,
    pub email_delivered: bool,
}

impl InvitationService {
    pub fn new(
        pool: PgPool,
        notifier: Arc<dyn Notifier>,
        public_base_url: String,
        invite_ttl_hours: i64,
    ) -> Self {
        Self {
            invites: InviteRepository::new(pool.clone()),
            pool,
            notifier,
            public_base_url,
            invite_ttl_hours,
        }
    }

    pub async fn create_invite(
        &self,
        email: String,
        role: AdminRole,
    ) -> Result<CreatedInvite, AppError> {
        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.invite_ttl_hours);

        let invite = self
            .invites
            .create(
                email.to_lowercase(),
                role.as_str().to_string(),
                token.clone(),
                expires_at,
            )
            .await?;

        let accept_url = format!(
            "{}/admin/invites/accept?token={}",
            self.public_base_url.trim_end_matches('/'),
            token
        );

        let body = format!(
            "You have been invited as {} operator. Accept here (valid for {} hours): {}",
            invite.role, self.invite_ttl_hours, accept_url
        );

        let email_delivered = match self
            .notifier
            .send_email(&invite.email, "Admin invitation", &body)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                // No aborta: la invitación ya está persistida
                warn!("Invite email to {} failed: {}", invite.email, e);
                false
            }
        };

        info!(
            "Invite {} created for {} (role {}, delivered={})",
            invite.id, invite.email, invite.role, email_delivered
        );

        Ok(CreatedInvite {
            invite,
            accept_url,
            email_delivered,
        })
    }

    /// Acepta una invitación. `authenticated_email` viene del claim del
    /// token verificado, nunca del body de la request.
    pub async fn accept_invite(
        &self,
        token: &str,
        authenticated_email: &str,
    ) -> Result<Admin, AppError> {
        let mut tx = self.pool.begin().await?;

        let invite =
            sqlx::query_as::<_, Invite>("SELECT * FROM invites WHERE token = $1 FOR UPDATE")
                .bind(token)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Invite not found".to_string()))?;

        invite.validate_acceptance(authenticated_email, Utc::now())?;

        sqlx::query("UPDATE invites SET used = TRUE WHERE id = $1")
            .bind(invite.id)
            .execute(&mut *tx)
            .await?;

        let now = Utc::now();
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (email, role, invited_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (email)
            DO UPDATE SET role = EXCLUDED.role, updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(invite.email.to_lowercase())
        .bind(&invite.role)
        .bind(invite.id.to_string())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Invite {} accepted by {}", invite.id, admin.email);
        Ok(admin)
    }

    pub async fn list_invites(&self) -> Result<Vec<Invite>, AppError> {
        self.invites.find_all().await
    }
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
