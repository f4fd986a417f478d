//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar datos de entrada
//! (matrículas, códigos QR) y convertir las fechas de mantenimiento
//! que envía el backend.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use validator::ValidationError;

use crate::utils::errors::VehicleRecordError;

/// Longitud máxima aceptada para un código QR
pub const MAX_QR_LENGTH: usize = 255;

/// Convertir una fecha de mantenimiento del backend a UTC
///
/// Acepta RFC3339 (`2024-03-01T10:00:00.000Z`) o una fecha simple (`2024-03-01`),
/// que se interpreta como medianoche UTC.
pub fn parse_maintenance_timestamp(value: &str) -> Result<DateTime<Utc>, VehicleRecordError> {
    let value = value.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::default()).and_utc())
        .map_err(|_| VehicleRecordError::InvalidMaintenanceDate(value.to_string()))
}

/// Normalizar un código QR leído por el escáner
pub fn normalize_qr(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_QR_LENGTH {
        return None;
    }
    Some(trimmed.to_string())
}

/// Validar un componente de matrícula (solo letras y dígitos)
pub fn validate_plate_component(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || !value.chars().all(char::is_alphanumeric) {
        let mut error = ValidationError::new("plate_component");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un código QR no esté vacío ni tenga espacios en los extremos
pub fn validate_qr_string(value: &str) -> Result<(), ValidationError> {
    if normalize_qr(value).as_deref() != Some(value) {
        let mut error = ValidationError::new("qr_string");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
