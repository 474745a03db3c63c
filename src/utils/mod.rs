//! Utilidades del sistema
//!
//! Manejo de errores y helpers comunes.

pub mod errors;
