use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::invite::Invite;

/// Request para crear una invitación de administrador
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteRequest {
    #[validate(email)]
    pub email: String,

    /// "admin" o "super_admin"; se valida contra AdminRole en el controller
    pub role: String,
}

/// Response al crear una invitación. `accept_url` se devuelve siempre para
/// poder compartir el enlace a mano si el email no salió.
#[derive(Debug, Serialize)]
pub struct InviteCreatedResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub expires_at: String,
    pub accept_url: String,
    pub email_delivered: bool,
}

/// Request para aceptar una invitación. El email NO viaja en el body: se
/// toma del claim verificado del token.
#[derive(Debug, Deserialize)]
pub struct AcceptInviteRequest {
    pub token: String,
}

/// Response al aceptar una invitación
#[derive(Debug, Serialize)]
pub struct InviteAcceptedResponse {
    pub email: String,
    pub role: String,
}

/// Vista administrativa de una invitación (sin token)
#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub used: bool,
    pub expires_at: String,
    pub created_at: String,
}

impl From<Invite> for InviteResponse {
    fn from(invite: Invite) -> Self {
        Self {
            id: invite.id.to_string(),
            email: invite.email,
            role: invite.role,
            used: invite.used,
            expires_at: invite.expires_at.to_rfc3339(),
            created_at: invite.created_at.to_rfc3339(),
        }
    }
}
