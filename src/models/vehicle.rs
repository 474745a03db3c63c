//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea a la tabla vehicles.
//! El flag `available` es nullable: su ausencia se lee como disponible.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: Decimal,
    pub available: Option<bool>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// NULL se interpreta como disponible (filas antiguas sin el flag).
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(available: Option<bool>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            make: "Renault".to_string(),
            model: "Clio".to_string(),
            year: 2022,
            price_per_day: Decimal::new(4500, 2),
            available,
            version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_null_available_reads_as_available() {
        assert!(vehicle(None).is_available());
        assert!(vehicle(Some(true)).is_available());
        assert!(!vehicle(Some(false)).is_available());
    }
}
