//! Evaluador de mantenimiento
//!
//! Calcula cuántos días pasaron desde el último mantenimiento de un vehículo
//! y si ya le corresponde uno nuevo según su periodo configurado.
//!
//! Política de fechas: días de calendario en UTC. Tanto "hoy" como cada
//! evento del historial se convierten a fecha UTC antes de restar, así que
//! dos eventos a las 23:59 y 00:01 de días consecutivos cuentan como un día.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use crate::utils::errors::MaintenanceError;

/// Texto que se muestra cuando el vehículo requiere mantenimiento
pub const NEEDS_MAINTENANCE_LABEL: &str = "needs maintenance";

/// Piso para los días reportados: un último mantenimiento con fecha futura
/// se reporta como 0 días y nunca como un conteo negativo.
pub const FUTURE_DATE_FLOOR_DAYS: i64 = 0;

/// Resultado de la evaluación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceStatus {
    pub last_maintenance: NaiveDate,
    pub days_since_last_maintenance: u32,
    pub maintenance_period: u32,
    pub is_due: bool,
}

/// Valor que se muestra en la tabla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceDisplay {
    DaysSince(u32),
    NeedsMaintenance,
}

impl fmt::Display for MaintenanceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceDisplay::DaysSince(days) => write!(f, "{}", days),
            MaintenanceDisplay::NeedsMaintenance => f.write_str(NEEDS_MAINTENANCE_LABEL),
        }
    }
}

impl MaintenanceStatus {
    pub fn display(&self) -> MaintenanceDisplay {
        if self.is_due {
            MaintenanceDisplay::NeedsMaintenance
        } else {
            MaintenanceDisplay::DaysSince(self.days_since_last_maintenance)
        }
    }
}

/// Días de calendario entre dos fechas (negativo si `to` es anterior a `from`)
pub fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Evaluar el mantenimiento respecto a la fecha `today` (UTC)
///
/// El historial debe estar en orden cronológico; se usa el último evento.
/// Un historial vacío devuelve `MaintenanceError::NoMaintenanceHistory`.
pub fn evaluate_maintenance(
    history: &[DateTime<Utc>],
    maintenance_period: u32,
    today: NaiveDate,
) -> Result<MaintenanceStatus, MaintenanceError> {
    let last = history
        .last()
        .ok_or(MaintenanceError::NoMaintenanceHistory)?
        .date_naive();

    let days = calendar_days_between(last, today).max(FUTURE_DATE_FLOOR_DAYS);
    let days_since_last_maintenance = u32::try_from(days).unwrap_or(u32::MAX);

    Ok(MaintenanceStatus {
        last_maintenance: last,
        days_since_last_maintenance,
        maintenance_period,
        is_due: days_since_last_maintenance >= maintenance_period,
    })
}

/// Fecha UTC de hoy, la referencia de todas las evaluaciones
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}
