//! Controller de reservas
//!
//! Reglas de negocio de creación y cambio de estado. Ambas delegan en el
//! sincronizador de disponibilidad, que hace el trabajo transaccional;
//! aquí solo se parsea y valida la entrada.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::booking::BookingStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::services::availability_service::AvailabilityService;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct BookingController {
    repository: BookingRepository,
    availability: AvailabilityService,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BookingRepository::new(pool.clone()),
            availability: AvailabilityService::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        if request.end_date < request.start_date {
            return Err(bad_request_error("end_date must not be before start_date"));
        }
        if request.total_price.is_sign_negative() {
            return Err(bad_request_error("total_price must not be negative"));
        }

        // Existencia del vehículo, lock y rechazo de solape van dentro de
        // la transacción del servicio
        let booking = self
            .availability
            .create_booking(
                request.vehicle_id,
                request.start_date,
                request.end_date,
                request.total_price,
                request.customer_name,
                request.customer_email,
                request.customer_phone,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Booking created".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BookingResponse, AppError> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))?;

        Ok(booking.into())
    }

    pub async fn list(&self) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = self.repository.find_all().await?;
        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    /// Punto de entrada del sincronizador: valida el estado recibido y
    /// aplica la transición de forma atómica sobre reserva + vehículo.
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<BookingStatusChangeResponse>, AppError> {
        let new_status = BookingStatus::parse(&request.status)?;

        let (booking, vehicle) = self.availability.apply_booking_status(id, new_status).await?;

        Ok(ApiResponse::success_with_message(
            BookingStatusChangeResponse {
                booking: booking.into(),
                vehicle: vehicle.into(),
            },
            format!("Booking status set to '{}'", new_status.as_str()),
        ))
    }
}

/// Estado final tras el cambio: la reserva y el vehículo sincronizado
#[derive(Debug, serde::Serialize)]
pub struct BookingStatusChangeResponse {
    pub booking: BookingResponse,
    pub vehicle: VehicleResponse,
}
