//! DTOs de la API HTTP
//!
//! Cuerpos de request/response de los endpoints del kiosco y de la
//! administración de vehículos.

pub mod charger_dto;
pub mod vehicle_dto;

use serde::Serialize;

/// Envoltorio estándar de respuesta
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
        }
    }
}
