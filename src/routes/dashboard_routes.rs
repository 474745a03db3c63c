use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::booking_dto::BookingResponse;
use crate::dto::dashboard_dto::{AvailabilityDashboardResponse, DashboardQuery, VehicleOutResponse};
use crate::middleware::auth::require_admin;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/active-bookings", get(active_bookings))
        .route("/vehicles-out", get(vehicles_out))
        .route("/overdue", get(overdue_bookings))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

async fn summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<AvailabilityDashboardResponse>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.summary(query.date).await?;
    Ok(Json(response))
}

async fn active_bookings(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.active_bookings(query.date).await?;
    Ok(Json(response))
}

async fn vehicles_out(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<VehicleOutResponse>>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.vehicles_out(query.date).await?;
    Ok(Json(response))
}

async fn overdue_bookings(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.overdue_bookings(query.date).await?;
    Ok(Json(response))
}
