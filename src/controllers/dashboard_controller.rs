//! Controller de dashboards de disponibilidad
//!
//! Las tres vistas (reservas activas, vehículos fuera, vencidas) salen del
//! mismo módulo de consultas en lugar de repetir el escaneo cada una.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use crate::dto::booking_dto::BookingResponse;
use crate::dto::dashboard_dto::{AvailabilityDashboardResponse, VehicleOutResponse};
use crate::services::availability_service::AvailabilityService;
use crate::utils::errors::AppError;

pub struct DashboardController {
    availability: AvailabilityService,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            availability: AvailabilityService::new(pool),
        }
    }

    fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
        date.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub async fn active_bookings(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<BookingResponse>, AppError> {
        let date = Self::resolve_date(date);
        let bookings = self.availability.active_bookings_on(date).await?;
        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    pub async fn vehicles_out(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<VehicleOutResponse>, AppError> {
        let date = Self::resolve_date(date);
        let out = self.availability.vehicles_out_on(date).await?;
        Ok(out
            .into_iter()
            .map(|(vehicle_id, booking)| VehicleOutResponse {
                vehicle_id: vehicle_id.to_string(),
                booking: booking.into(),
            })
            .collect())
    }

    pub async fn overdue_bookings(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<BookingResponse>, AppError> {
        let date = Self::resolve_date(date);
        let bookings = self.availability.overdue_bookings(date).await?;
        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    /// Vista combinada para la pantalla principal del back-office
    pub async fn summary(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<AvailabilityDashboardResponse, AppError> {
        let date = Self::resolve_date(date);

        let active = self.availability.active_bookings_on(date).await?;
        let out = self.availability.vehicles_out_on(date).await?;
        let overdue = self.availability.overdue_bookings(date).await?;

        Ok(AvailabilityDashboardResponse {
            date,
            active_bookings: active.into_iter().map(BookingResponse::from).collect(),
            vehicles_out: out
                .into_iter()
                .map(|(vehicle_id, booking)| VehicleOutResponse {
                    vehicle_id: vehicle_id.to_string(),
                    booking: booking.into(),
                })
                .collect(),
            overdue_bookings: overdue.into_iter().map(BookingResponse::from).collect(),
        })
    }
}
