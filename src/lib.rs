//! Backend del kiosco de carga de la flota
//!
//! Evalúa el vencimiento de mantenimiento de cada vehículo y conduce el
//! flujo de confirmación del cargador: escaneo de QR, búsqueda del vehículo,
//! confirmación de matrícula, apertura del dispensador y notas.

pub mod clients;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
