//! Services module
//!
//! Este módulo contiene la lógica de negocio que cruza varias tablas o
//! integra servicios externos: el sincronizador de disponibilidad, el
//! flujo de invitaciones, JWT y el canal de notificaciones.

pub mod authorization_service;
pub mod availability_service;
pub mod invitation_service;
pub mod jwt_service;
pub mod notification_service;
