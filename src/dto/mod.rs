//! DTOs de la API
//!
//! Requests con derives de validator y responses serializables, separados
//! de los modelos que mapean al schema.

pub mod auth_dto;
pub mod booking_dto;
pub mod common;
pub mod dashboard_dto;
pub mod invite_dto;
pub mod vehicle_dto;
