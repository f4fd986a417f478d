use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::charger::{DispenserNumber, DispenserOutcome, Stage};
use crate::models::vehicle::Vehicle;
use crate::services::charger_state_machine::ChargerSession;

// Request de escaneo: payload decodificado del QR
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub qr: String,
}

// Request de apertura; sin número se usa el dispensador por defecto
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispenserRequest {
    #[serde(default)]
    pub dispenser_number: Option<u8>,
}

// Request de nota del cargador
#[derive(Debug, Clone, Deserialize)]
pub struct NoteRequest {
    pub note: String,
}

// Vehículo escaneado tal como lo ve el kiosco
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedVehicleResponse {
    pub id: String,
    pub plate_no: String,
    pub plate_str: String,
    pub plate: String,
    pub qr_str: String,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub maintenance_period: u32,
    pub charger_note: Option<String>,
}

impl From<&Vehicle> for ScannedVehicleResponse {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            plate_no: vehicle.plate.number.clone(),
            plate_str: vehicle.plate.letters.clone(),
            plate: vehicle.plate.to_string(),
            qr_str: vehicle.qr_str.clone(),
            last_maintenance: vehicle.last_maintenance(),
            maintenance_period: vehicle.maintenance_period,
            charger_note: vehicle.charger_note.clone(),
        }
    }
}

// Response de sesión del kiosco
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponse {
    pub stage: Stage,
    pub scanned_vehicle: Option<ScannedVehicleResponse>,
    pub error: Option<String>,
    pub scanner_open: bool,
    pub lookup_in_flight: bool,
}

impl From<&ChargerSession> for SessionResponse {
    fn from(session: &ChargerSession) -> Self {
        Self {
            stage: session.stage(),
            scanned_vehicle: session.scanned_vehicle().map(ScannedVehicleResponse::from),
            error: session.error().map(|e| e.to_string()),
            scanner_open: session.scanner_open(),
            lookup_in_flight: session.pending_lookup().is_some(),
        }
    }
}

impl From<ChargerSession> for SessionResponse {
    fn from(session: ChargerSession) -> Self {
        Self::from(&session)
    }
}

// Response del comando de apertura
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispenserResponse {
    pub sent: bool,
    pub dispenser: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DispenserResponse {
    pub fn new(dispenser: DispenserNumber, outcome: &DispenserOutcome) -> Self {
        Self {
            sent: outcome.sent(),
            dispenser: dispenser.get(),
            reason: outcome.reason().map(str::to_string),
        }
    }
}
