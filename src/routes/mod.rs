//! Routers de la API
//!
//! Un router por recurso más el ensamblado completo de la aplicación,
//! que los tests de integración montan tal cual con ServiceExt.

pub mod auth_routes;
pub mod booking_routes;
pub mod dashboard_routes;
pub mod invite_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Router completo de la aplicación (sin capas de CORS, que añade main
/// según el entorno).
pub fn create_app_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest(
            "/api/vehicle",
            vehicle_routes::create_vehicle_router(app_state.clone()),
        )
        .nest(
            "/api/booking",
            booking_routes::create_booking_router(app_state.clone()),
        )
        .nest(
            "/api/invite",
            invite_routes::create_invite_router(app_state.clone()),
        )
        .nest(
            "/api/dashboard",
            dashboard_routes::create_dashboard_router(app_state.clone()),
        )
        .with_state(app_state)
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "rental-backend",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
