//! Backend de alquiler de coches: reservas, sincronización de
//! disponibilidad de vehículos, invitaciones de administradores y
//! dashboards de back-office.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
