//! Repositorio de invitaciones
//!
//! Acceso a la tabla invites. La aceptación (marcar usada + upsert del
//! admin) es transaccional y vive en InvitationService.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::invite::Invite;
use crate::utils::errors::AppError;

pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: String,
        role: String,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<Invite, AppError> {
        let invite = sqlx::query_as::<_, Invite>(
            r#"
            INSERT INTO invites (id, email, role, token, used, expires_at, created_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(role)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(invite)
    }

    pub async fn find_all(&self) -> Result<Vec<Invite>, AppError> {
        let invites =
            sqlx::query_as::<_, Invite>("SELECT * FROM invites ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(invites)
    }
}
