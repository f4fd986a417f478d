use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{NewVehiclePayload, DEFAULT_MAINTENANCE_PERIOD_DAYS};
use crate::utils::validation::{validate_plate_component, validate_qr_string};

fn default_maintenance_period() -> u32 {
    DEFAULT_MAINTENANCE_PERIOD_DAYS
}

// Request para registrar un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 10), custom = "validate_plate_component")]
    pub plate_no: String,

    #[validate(length(min = 1, max = 10), custom = "validate_plate_component")]
    pub plate_str: String,

    #[validate(length(min = 1, max = 255), custom = "validate_qr_string")]
    pub qr_str: String,

    pub last_maintenance_date: NaiveDate,

    #[serde(default = "default_maintenance_period")]
    #[validate(range(min = 1, max = 3650))]
    pub maintenance_period: u32,
}

impl CreateVehicleRequest {
    /// Cuerpo para el backend; la fecha viaja como medianoche UTC en RFC3339
    pub fn into_payload(self) -> NewVehiclePayload {
        let last_maintenance_date = self
            .last_maintenance_date
            .and_time(NaiveTime::default())
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        NewVehiclePayload {
            plate_str: self.plate_str,
            plate_no: self.plate_no,
            qr_string: self.qr_str.clone(),
            qr_str: self.qr_str,
            last_maintenance_date,
            maintenance_period: self.maintenance_period,
        }
    }
}

// Fila de la tabla de administración
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleRowResponse {
    pub id: String,
    pub plate: String,
    pub last_maintenance_date: String,
    pub maintenance_period: u32,
    /// Días desde el último mantenimiento, "needs maintenance" o "-"
    pub remaining: String,
    pub needs_maintenance: Option<bool>,
    pub qr_str: String,
    pub charger_note: Option<String>,
}
