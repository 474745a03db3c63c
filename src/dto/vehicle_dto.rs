use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::vehicle::Vehicle;

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1980, max = 2035))]
    pub year: i32,

    pub price_per_day: Decimal,
}

/// Request para actualizar un vehículo existente.
/// `available` aquí es una edición directa del flag; el sincronizador de
/// disponibilidad lo sobreescribe en cada cambio de estado de reserva.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1980, max = 2035))]
    pub year: Option<i32>,

    pub price_per_day: Option<Decimal>,

    pub available: Option<bool>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: String,
    pub available: bool,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        let available = vehicle.is_available();
        Self {
            id: vehicle.id.to_string(),
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            price_per_day: vehicle.price_per_day.to_string(),
            available,
            version: vehicle.version,
            created_at: vehicle.created_at.to_rfc3339(),
            updated_at: vehicle.updated_at.to_rfc3339(),
        }
    }
}
