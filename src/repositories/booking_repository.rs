//! Repositorio de reservas
//!
//! Acceso de lectura a la tabla bookings. Las escrituras (alta y cambio de
//! estado) son transaccionales y viven en AvailabilityService; el predicado
//! de fecha de los dashboards vive en el modelo (Booking::is_active_on),
//! aquí solo se pre-filtra por estado.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::Booking;
use crate::utils::errors::AppError;

/// Estados que mantienen el vehículo ocupado, para cláusulas IN.
/// Debe coincidir con BookingStatus::occupies_vehicle.
pub const OCCUPYING_STATUSES: &str = "'confirmed', 'approved', 'active'";

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn find_all(&self) -> Result<Vec<Booking>, AppError> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    /// Todas las reservas en estado ocupante. Los dashboards filtran por
    /// fecha en Rust sobre este resultado; coste O(N) sobre las reservas
    /// ocupantes por llamada.
    pub async fn find_occupying(&self) -> Result<Vec<Booking>, AppError> {
        let query = format!(
            r#"
            SELECT * FROM bookings
            WHERE status IN ({OCCUPYING_STATUSES})
            ORDER BY start_date ASC
            "#
        );
        let bookings = sqlx::query_as::<_, Booking>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }
}
