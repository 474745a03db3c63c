//! Repositorios de acceso a datos
//!
//! Un repositorio por tabla, cada uno envolviendo el pool de PostgreSQL.

pub mod admin_repository;
pub mod booking_repository;
pub mod invite_repository;
pub mod user_repository;
pub mod vehicle_repository;
