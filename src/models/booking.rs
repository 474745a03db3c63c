//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking, el enum de estados con su tabla
//! de transiciones y el predicado de solapamiento de fechas que usan los
//! dashboards de disponibilidad.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado de una reserva. En base de datos se persiste como TEXT en
/// minúsculas; cualquier valor fuera de esta enumeración se rechaza al
/// parsear la request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Approved,
    Active,
    Cancelled,
    Rejected,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Approved => "approved",
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "approved" => Some(BookingStatus::Approved),
            "active" => Some(BookingStatus::Active),
            "cancelled" => Some(BookingStatus::Cancelled),
            "rejected" => Some(BookingStatus::Rejected),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    /// Parsear el estado recibido en una request. Un valor desconocido es
    /// un error del cliente, nunca se persiste tal cual.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        Self::from_str(s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown booking status '{}'", s)))
    }

    /// Estados que mantienen el vehículo ocupado.
    pub fn occupies_vehicle(&self) -> bool {
        matches!(
            self,
            BookingStatus::Confirmed | BookingStatus::Approved | BookingStatus::Active
        )
    }

    /// Estados que liberan el vehículo: al aplicarlos, el sincronizador
    /// escribe `available = true` en el vehículo asociado.
    pub fn frees_vehicle(&self) -> bool {
        matches!(
            self,
            BookingStatus::Cancelled | BookingStatus::Rejected | BookingStatus::Completed
        )
    }

    /// Estados terminales: no admiten ninguna transición posterior.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Cancelled | BookingStatus::Rejected | BookingStatus::Completed
        )
    }

    /// Tabla de transiciones del ciclo de vida:
    /// pending -> {confirmed, approved, cancelled, rejected}
    /// confirmed / approved -> {active, completed, cancelled, rejected}
    /// active -> {completed}
    /// Repetir el estado actual es un no-op aceptado (idempotencia).
    /// Una reserva confirmada o aprobada puede cerrarse directamente como
    /// completed sin pasar por active (devolución sin check-in registrado).
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        if *self == next {
            return true;
        }
        match self {
            BookingStatus::Pending => matches!(
                next,
                BookingStatus::Confirmed
                    | BookingStatus::Approved
                    | BookingStatus::Cancelled
                    | BookingStatus::Rejected
            ),
            BookingStatus::Confirmed | BookingStatus::Approved => matches!(
                next,
                BookingStatus::Active
                    | BookingStatus::Completed
                    | BookingStatus::Cancelled
                    | BookingStatus::Rejected
            ),
            BookingStatus::Active => matches!(next, BookingStatus::Completed),
            BookingStatus::Cancelled | BookingStatus::Rejected | BookingStatus::Completed => false,
        }
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub total_price: Decimal,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Estado tipado de la fila. Una fila con estado desconocido solo puede
    /// venir de escrituras ajenas a este servicio.
    pub fn parsed_status(&self) -> Result<BookingStatus, AppError> {
        BookingStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!(
                "Booking {} has unknown status '{}' in store",
                self.id, self.status
            ))
        })
    }

    /// Predicado de "reserva activa en la fecha dada":
    /// estado ocupante y start_date <= date + 1 dia y end_date >= date.
    /// El margen de un día en el inicio reproduce el comportamiento de los
    /// dashboards: una reserva que empieza mañana ya cuenta como salida.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        let occupies = BookingStatus::from_str(&self.status)
            .map(|s| s.occupies_vehicle())
            .unwrap_or(false);
        occupies && self.start_date <= date + Duration::days(1) && self.end_date >= date
    }

    /// Reserva en estado ocupante cuya fecha de fin ya pasó.
    pub fn is_overdue_on(&self, date: NaiveDate) -> bool {
        let occupies = BookingStatus::from_str(&self.status)
            .map(|s| s.occupies_vehicle())
            .unwrap_or(false);
        occupies && self.end_date < date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: &str, start: &str, end: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            status: status.to_string(),
            total_price: Decimal::new(25000, 2),
            customer_name: "Alice Doe".to_string(),
            customer_email: "alice@example.com".to_string(),
            customer_phone: "+33600000000".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_round_trip() {
        for s in [
            "pending",
            "confirmed",
            "approved",
            "active",
            "cancelled",
            "rejected",
            "completed",
        ] {
            assert_eq!(BookingStatus::from_str(s).unwrap().as_str(), s);
        }
        assert!(BookingStatus::from_str("archived").is_none());
        assert!(BookingStatus::parse("archived").is_err());
    }

    #[test]
    fn test_availability_derivation() {
        // Tras aplicar un estado liberador, available debe quedar en true;
        // tras uno ocupante, en false.
        for s in [
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
            BookingStatus::Completed,
        ] {
            assert!(s.frees_vehicle());
            assert!(!s.occupies_vehicle());
        }
        for s in [
            BookingStatus::Confirmed,
            BookingStatus::Approved,
            BookingStatus::Active,
        ] {
            assert!(s.occupies_vehicle());
            assert!(!s.frees_vehicle());
        }
        assert!(!BookingStatus::Pending.occupies_vehicle());
        assert!(!BookingStatus::Pending.frees_vehicle());
    }

    #[test]
    fn test_transition_table() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Active));
        assert!(!Pending.can_transition_to(Completed));

        assert!(Confirmed.can_transition_to(Active));
        assert!(Approved.can_transition_to(Active));
        assert!(Approved.can_transition_to(Cancelled));
        // Cierre directo sin pasar por active
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Approved.can_transition_to(Completed));

        assert!(Active.can_transition_to(Completed));
        assert!(!Active.can_transition_to(Cancelled));

        for terminal in [Cancelled, Rejected, Completed] {
            assert!(terminal.is_terminal());
            for next in [Pending, Confirmed, Approved, Active] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_approved_to_completed_frees_vehicle() {
        // Cierre directo de una reserva aprobada: transición válida y el
        // vehículo queda disponible
        assert!(BookingStatus::Approved.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Completed.frees_vehicle());
    }

    #[test]
    fn test_same_status_is_idempotent_transition() {
        use BookingStatus::*;
        for s in [Pending, Confirmed, Approved, Active, Cancelled, Rejected, Completed] {
            assert!(s.can_transition_to(s));
        }
    }

    #[test]
    fn test_is_active_on_covers_interval() {
        let b = booking("approved", "2025-06-01", "2025-06-05");
        assert!(b.is_active_on("2025-06-01".parse().unwrap()));
        assert!(b.is_active_on("2025-06-03".parse().unwrap()));
        assert!(b.is_active_on("2025-06-05".parse().unwrap()));
        // Margen de un día: la víspera del inicio ya cuenta
        assert!(b.is_active_on("2025-05-31".parse().unwrap()));
        assert!(!b.is_active_on("2025-05-30".parse().unwrap()));
        assert!(!b.is_active_on("2025-06-06".parse().unwrap()));
    }

    #[test]
    fn test_is_active_on_requires_occupying_status() {
        for status in ["pending", "cancelled", "rejected", "completed"] {
            let b = booking(status, "2025-06-01", "2025-06-05");
            assert!(!b.is_active_on("2025-06-03".parse().unwrap()));
        }
    }

    #[test]
    fn test_is_overdue_on() {
        let b = booking("active", "2025-06-01", "2025-06-05");
        assert!(!b.is_overdue_on("2025-06-05".parse().unwrap()));
        assert!(b.is_overdue_on("2025-06-06".parse().unwrap()));

        let done = booking("completed", "2025-06-01", "2025-06-05");
        assert!(!done.is_overdue_on("2025-06-06".parse().unwrap()));
    }
}
