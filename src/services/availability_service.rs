//! Sincronizador de disponibilidad
//!
//! Mantiene Vehicle.available consistente con el estado agregado de las
//! reservas del vehículo. El cambio de estado de la reserva y la escritura
//! del flag del vehículo van en UNA transacción: o se aplican ambos o
//! ninguno. Toda transacción toma primero el lock de la fila del vehículo:
//! sin él, dos transiciones concurrentes sobre reservas distintas del mismo
//! vehículo pasan ambas el chequeo de solape antes de que ninguna haga
//! commit (write skew) y la doble reserva entra igualmente. También
//! concentra las consultas de "qué está fuera hoy" que antes duplicaba
//! cada dashboard.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::BTreeMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus};
use crate::models::vehicle::Vehicle;
use crate::repositories::booking_repository::{BookingRepository, OCCUPYING_STATUSES};
use crate::utils::errors::{not_found_error, AppError};

pub struct AvailabilityService {
    pool: PgPool,
    bookings: BookingRepository,
}

impl AvailabilityService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crea una reserva en estado pending. Dentro de la transacción se toma
    /// el lock del vehículo y se rechaza el solape con cualquier reserva
    /// ocupante, de forma que dos altas concurrentes para las mismas fechas
    /// no puedan colarse entre el chequeo y el INSERT.
    ///
    /// El alta no toca `available`: pending no es un estado ocupante.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_booking(
        &self,
        vehicle_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_price: Decimal,
        customer_name: String,
        customer_email: String,
        customer_phone: String,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        lock_vehicle(&mut tx, vehicle_id).await?;

        if let Some(other) =
            find_overlapping_occupying(&mut tx, vehicle_id, start_date, end_date, None).await?
        {
            return Err(AppError::Conflict(format!(
                "Vehicle '{}' already has booking '{}' for overlapping dates",
                vehicle_id, other.id
            )));
        }

        let now = Utc::now();
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (id, vehicle_id, start_date, end_date, status, total_price,
                 customer_name, customer_email, customer_phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(start_date)
        .bind(end_date)
        .bind(total_price)
        .bind(customer_name)
        .bind(customer_email)
        .bind(customer_phone)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Booking {} created for vehicle {}", booking.id, vehicle_id);
        Ok(booking)
    }

    /// Aplica un nuevo estado a la reserva y sincroniza el vehículo.
    ///
    /// Dentro de la transacción:
    /// 1. lock de la fila de la reserva (FOR UPDATE)
    /// 2. validación de la tabla de transiciones
    /// 3. lock de la fila del vehículo (FOR UPDATE): serializa las
    ///    transiciones concurrentes sobre el mismo vehículo
    /// 4. al entrar en un estado ocupante, rechazo de solapamientos con
    ///    otra reserva ocupante del mismo vehículo
    /// 5. UPDATE de bookings.status y de vehicles.available, con bump de
    ///    vehicles.version
    ///
    /// Repetir el mismo estado es un no-op válido que deja el mismo estado
    /// final (idempotencia).
    pub async fn apply_booking_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<(Booking, Vehicle), AppError> {
        let mut tx = self.pool.begin().await?;

        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        let current = booking.parsed_status()?;
        if !current.can_transition_to(new_status) {
            return Err(AppError::InvalidTransition {
                from: current.as_str().to_string(),
                to: new_status.as_str().to_string(),
            });
        }

        lock_vehicle(&mut tx, booking.vehicle_id).await?;

        if new_status.occupies_vehicle() && current != new_status {
            let overlap = find_overlapping_occupying(
                &mut tx,
                booking.vehicle_id,
                booking.start_date,
                booking.end_date,
                Some(booking.id),
            )
            .await?;

            if let Some(other) = overlap {
                return Err(AppError::Conflict(format!(
                    "Vehicle '{}' already has booking '{}' for overlapping dates",
                    booking.vehicle_id, other.id
                )));
            }
        }

        let now = Utc::now();
        let updated_booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(booking.id)
        .bind(new_status.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        // available = true solo para estados que liberan el vehículo
        let available = new_status.frees_vehicle();
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET available = $2, version = version + 1, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking.vehicle_id)
        .bind(available)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Booking {} -> '{}', vehicle {} available={}",
            booking.id,
            new_status.as_str(),
            vehicle.id,
            available
        );

        Ok((updated_booking, vehicle))
    }

    /// Reservas activas en la fecha dada, según Booking::is_active_on.
    pub async fn active_bookings_on(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let occupying = self.bookings.find_occupying().await?;
        Ok(occupying
            .into_iter()
            .filter(|b| b.is_active_on(date))
            .collect())
    }

    /// Vehículos fuera en la fecha dada: una entrada por vehicle_id
    /// distinto, emparejada con su reserva activa.
    pub async fn vehicles_out_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<(Uuid, Booking)>, AppError> {
        let active = self.active_bookings_on(date).await?;
        Ok(group_vehicles_out(active))
    }

    /// Reservas ocupantes con fecha de fin vencida. Solo informativo.
    pub async fn overdue_bookings(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let occupying = self.bookings.find_occupying().await?;
        Ok(occupying
            .into_iter()
            .filter(|b| b.is_overdue_on(date))
            .collect())
    }
}

/// Lock de la fila del vehículo dentro de la transacción. Todo camino que
/// escribe reservas de un vehículo pasa por aquí antes de chequear solapes.
async fn lock_vehicle(
    tx: &mut Transaction<'_, Postgres>,
    vehicle_id: Uuid,
) -> Result<(), AppError> {
    let locked: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(vehicle_id)
            .fetch_optional(&mut **tx)
            .await?;

    match locked {
        Some(_) => Ok(()),
        None => Err(not_found_error("Vehicle", &vehicle_id.to_string())),
    }
}

/// Reserva ocupante del mismo vehículo cuyo rango de fechas se solape con
/// [start_date, end_date] (intervalos cerrados). Se ejecuta con el lock del
/// vehículo ya tomado.
async fn find_overlapping_occupying(
    tx: &mut Transaction<'_, Postgres>,
    vehicle_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    exclude_id: Option<Uuid>,
) -> Result<Option<Booking>, AppError> {
    let query = format!(
        r#"
        SELECT * FROM bookings
        WHERE vehicle_id = $1
          AND status IN ({OCCUPYING_STATUSES})
          AND start_date <= $3
          AND end_date >= $2
          AND ($4::uuid IS NULL OR id <> $4)
        LIMIT 1
        "#
    );
    let booking = sqlx::query_as::<_, Booking>(&query)
        .bind(vehicle_id)
        .bind(start_date)
        .bind(end_date)
        .bind(exclude_id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(booking)
}

/// Agrupa las reservas activas por vehículo. Si un vehículo aparece más de
/// una vez hay una doble reserva que la escritura de la tabla no impidió:
/// gana la última inserción, pero se deja constancia en el log en lugar de
/// enmascararla en silencio.
pub fn group_vehicles_out(active: Vec<Booking>) -> Vec<(Uuid, Booking)> {
    let mut out: BTreeMap<Uuid, Booking> = BTreeMap::new();
    for booking in active {
        let vehicle_id = booking.vehicle_id;
        let booking_id = booking.id;
        if let Some(previous) = out.insert(vehicle_id, booking) {
            warn!(
                "Vehicle {} has concurrently active bookings {} and {}",
                vehicle_id, previous.id, booking_id
            );
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn booking(vehicle_id: Uuid, status: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            vehicle_id,
            start_date: "2025-06-01".parse().unwrap(),
            end_date: "2025-06-05".parse().unwrap(),
            status: status.to_string(),
            total_price: Decimal::new(10000, 2),
            customer_name: "Alice Doe".to_string(),
            customer_email: "alice@example.com".to_string(),
            customer_phone: "+33600000000".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_one_entry_per_distinct_vehicle() {
        let v1 = Uuid::new_v4();
        let v2 = Uuid::new_v4();
        let grouped = group_vehicles_out(vec![
            booking(v1, "approved"),
            booking(v2, "active"),
            booking(v1, "confirmed"),
        ]);

        assert_eq!(grouped.len(), 2);
        let vehicle_ids: Vec<Uuid> = grouped.iter().map(|(id, _)| *id).collect();
        assert!(vehicle_ids.contains(&v1));
        assert!(vehicle_ids.contains(&v2));
    }

    #[test]
    fn test_duplicate_vehicle_last_booking_wins() {
        let v1 = Uuid::new_v4();
        let first = booking(v1, "approved");
        let second = booking(v1, "active");
        let second_id = second.id;

        let grouped = group_vehicles_out(vec![first, second]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].1.id, second_id);
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert!(group_vehicles_out(Vec::new()).is_empty());
    }
}
