//! Controller de invitaciones de administrador

use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::invite_dto::{
    AcceptInviteRequest, CreateInviteRequest, InviteAcceptedResponse, InviteCreatedResponse,
    InviteResponse,
};
use crate::models::invite::AdminRole;
use crate::services::invitation_service::InvitationService;
use crate::services::notification_service::Notifier;
use crate::utils::errors::AppError;

pub struct InviteController {
    service: InvitationService,
}

impl InviteController {
    pub fn new(
        pool: PgPool,
        notifier: Arc<dyn Notifier>,
        public_base_url: String,
        invite_ttl_hours: i64,
    ) -> Self {
        Self {
            service: InvitationService::new(pool, notifier, public_base_url, invite_ttl_hours),
        }
    }

    pub async fn create(
        &self,
        request: CreateInviteRequest,
    ) -> Result<ApiResponse<InviteCreatedResponse>, AppError> {
        request.validate()?;

        let role = AdminRole::from_str(&request.role)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown role '{}'", request.role)))?;

        let created = self.service.create_invite(request.email, role).await?;

        let message = if created.email_delivered {
            "Invite created and emailed".to_string()
        } else {
            "Invite created; email delivery failed, share the link manually".to_string()
        };

        Ok(ApiResponse::success_with_message(
            InviteCreatedResponse {
                id: created.invite.id.to_string(),
                email: created.invite.email,
                role: created.invite.role,
                expires_at: created.invite.expires_at.to_rfc3339(),
                accept_url: created.accept_url,
                email_delivered: created.email_delivered,
            },
            message,
        ))
    }

    pub async fn accept(
        &self,
        request: AcceptInviteRequest,
        authenticated_email: &str,
    ) -> Result<ApiResponse<InviteAcceptedResponse>, AppError> {
        let admin = self
            .service
            .accept_invite(&request.token, authenticated_email)
            .await?;

        Ok(ApiResponse::success_with_message(
            InviteAcceptedResponse {
                email: admin.email,
                role: admin.role,
            },
            "Invite accepted".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<InviteResponse>, AppError> {
        let invites = self.service.list_invites().await?;
        Ok(invites.into_iter().map(InviteResponse::from).collect())
    }
}
