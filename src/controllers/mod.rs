//! Controllers de la API
//!
//! Reglas de negocio por recurso; los handlers de routes los construyen
//! por request a partir del estado compartido.

pub mod auth_controller;
pub mod booking_controller;
pub mod dashboard_controller;
pub mod invite_controller;
pub mod vehicle_controller;
