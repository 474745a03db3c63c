use serde::{Deserialize, Serialize};

use crate::dto::booking_dto::BookingResponse;

/// Query param común de los dashboards; sin fecha se usa hoy (UTC)
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<chrono::NaiveDate>,
}

/// Un vehículo fuera hoy, con la reserva activa que lo tiene ocupado
#[derive(Debug, Serialize)]
pub struct VehicleOutResponse {
    pub vehicle_id: String,
    pub booking: BookingResponse,
}

/// Response del dashboard de disponibilidad
#[derive(Debug, Serialize)]
pub struct AvailabilityDashboardResponse {
    pub date: chrono::NaiveDate,
    pub active_bookings: Vec<BookingResponse>,
    pub vehicles_out: Vec<VehicleOutResponse>,
    pub overdue_bookings: Vec<BookingResponse>,
}
