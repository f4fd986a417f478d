//! Modelo de Vehicle
//!
//! Este módulo contiene el vehículo normalizado que usa el resto del sistema,
//! el registro crudo tal como llega del backend remoto (`/cars`) y la
//! conversión entre ambos. Ningún consumidor aguas abajo maneja campos
//! opcionales crudos: todo pasa por `Vehicle::try_from(RawVehicle)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::errors::VehicleRecordError;
use crate::utils::validation::parse_maintenance_timestamp;

/// Periodo de mantenimiento por defecto (días)
pub const DEFAULT_MAINTENANCE_PERIOD_DAYS: u32 = 30;

/// Matrícula en dos componentes: grupo numérico y grupo de letras
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plate {
    pub number: String,
    pub letters: String,
}

impl Plate {
    pub fn new(number: impl Into<String>, letters: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            letters: letters.into(),
        }
    }
}

/// Separar cada carácter con un espacio; un componente vacío se muestra como "-"
fn spaced(component: &str) -> String {
    if component.is_empty() {
        return "-".to_string();
    }
    component
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", spaced(&self.number), spaced(&self.letters))
    }
}

/// Vehículo normalizado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub plate: Plate,
    pub qr_str: String,
    /// Historial cronológico; el más reciente es el último
    pub maintenances: Vec<DateTime<Utc>>,
    pub maintenance_period: u32,
    pub charger_note: Option<String>,
}

impl Vehicle {
    pub fn last_maintenance(&self) -> Option<DateTime<Utc>> {
        self.maintenances.last().copied()
    }
}

/// Registro de vehículo tal como lo devuelve el backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVehicle {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub plate_no: Option<String>,
    pub plate_str: Option<String>,
    pub maintenances: Option<Vec<String>>,
    pub qr_str: Option<String>,
    pub charger_note: Option<String>,
    pub maintenance_period: Option<i64>,
}

/// Envoltorio `{ "data": [...] }` de las respuestas de listado del backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleEnvelope {
    #[serde(default)]
    pub data: Vec<RawVehicle>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, VehicleRecordError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(VehicleRecordError::MissingField(field))
}

impl TryFrom<RawVehicle> for Vehicle {
    type Error = VehicleRecordError;

    fn try_from(raw: RawVehicle) -> Result<Self, Self::Error> {
        let id = required(raw.id, "_id")?;
        let qr_str = required(raw.qr_str, "qr_str")?;

        let mut maintenances = raw
            .maintenances
            .unwrap_or_default()
            .iter()
            .map(|entry| parse_maintenance_timestamp(entry))
            .collect::<Result<Vec<_>, _>>()?;
        maintenances.sort();

        let maintenance_period = match raw.maintenance_period {
            None => DEFAULT_MAINTENANCE_PERIOD_DAYS,
            Some(period) if period > 0 => u32::try_from(period)
                .map_err(|_| VehicleRecordError::InvalidMaintenancePeriod(period))?,
            Some(period) => return Err(VehicleRecordError::InvalidMaintenancePeriod(period)),
        };

        let charger_note = raw
            .charger_note
            .filter(|note| !note.trim().is_empty());

        Ok(Vehicle {
            id,
            plate: Plate::new(
                raw.plate_no.unwrap_or_default().trim(),
                raw.plate_str.unwrap_or_default().trim(),
            ),
            qr_str,
            maintenances,
            maintenance_period,
            charger_note,
        })
    }
}

/// Cuerpo de `POST {backend}/cars`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVehiclePayload {
    pub plate_str: String,
    pub plate_no: String,
    pub qr_str: String,
    /// Duplicado del QR que el backend también lee
    #[serde(rename = "qrString")]
    pub qr_string: String,
    pub last_maintenance_date: String,
    pub maintenance_period: u32,
}

/// Cuerpo de `PUT {backend}/cars/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargerNoteUpdate {
    pub charger_note: String,
}
