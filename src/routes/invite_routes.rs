use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::invite_controller::InviteController;
use crate::dto::common::ApiResponse;
use crate::dto::invite_dto::{
    AcceptInviteRequest, CreateInviteRequest, InviteAcceptedResponse, InviteCreatedResponse,
    InviteResponse,
};
use crate::middleware::auth::{require_admin, require_auth};
use crate::models::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invite_router(state: AppState) -> Router<AppState> {
    // Crear y listar invitaciones es de admins; aceptar solo requiere
    // identidad verificada (el invitado aún no es admin)
    let admin = Router::new()
        .route("/", post(create_invite))
        .route("/", get(list_invites))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let authenticated = Router::new()
        .route("/accept", post(accept_invite))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    admin.merge(authenticated)
}

fn controller(state: &AppState) -> InviteController {
    InviteController::new(
        state.pool.clone(),
        state.notifier.clone(),
        state.config.public_base_url.clone(),
        state.config.invite_ttl_hours,
    )
}

async fn create_invite(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedUser>,
    Json(request): Json<CreateInviteRequest>,
) -> Result<Json<ApiResponse<InviteCreatedResponse>>, AppError> {
    tracing::info!("Admin {} invites {}", admin.email, request.email);
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn list_invites(
    State(state): State<AppState>,
) -> Result<Json<Vec<InviteResponse>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn accept_invite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AcceptInviteRequest>,
) -> Result<Json<ApiResponse<InviteAcceptedResponse>>, AppError> {
    let response = controller(&state).accept(request, &user.email).await?;
    Ok(Json(response))
}
