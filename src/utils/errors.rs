//! Sistema de manejo de errores
//!
//! Este módulo define los errores de dominio (mantenimiento, kiosco de carga,
//! clientes HTTP, configuración) y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::charger::Stage;

/// Errores al normalizar un registro de vehículo recibido del backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VehicleRecordError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid maintenance timestamp '{0}'")]
    InvalidMaintenanceDate(String),

    #[error("invalid maintenance period {0}")]
    InvalidMaintenancePeriod(i64),
}

/// Errores del evaluador de mantenimiento
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceError {
    #[error("vehicle has no maintenance history")]
    NoMaintenanceHistory,
}

/// Errores del flujo del kiosco de carga
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChargerError {
    #[error("something went wrong. Couldn't fetch vehicle")]
    VehicleLookupFailed,

    #[error("note submission failed: {0}")]
    NoteSubmissionFailed(String),

    #[error("dispenser command failed: {0}")]
    DispenserCommandFailed(String),

    #[error("cannot {operation} while session is {stage}")]
    InvalidStage { operation: &'static str, stage: Stage },

    #[error("dispenser {number} is out of range 1..={count}")]
    InvalidDispenser { number: u8, count: u8 },

    #[error("note must not be empty")]
    EmptyNote,
}

/// Errores de los clientes HTTP externos (API de vehículos, dispensador)
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("no vehicle found for QR '{0}'")]
    NotFound(String),

    #[error("malformed vehicle record: {0}")]
    Record(#[from] VehicleRecordError),
}

/// Errores de configuración del entorno
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Charger error: {0}")]
    Charger(#[from] ChargerError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl From<ClientError> for AppError {
    fn from(error: ClientError) -> Self {
        AppError::ExternalApi(error.to_string())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }
}

fn charger_error_response(error: ChargerError) -> (StatusCode, ErrorResponse) {
    let message = error.to_string();
    match error {
        ChargerError::VehicleLookupFailed => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::new("Vehicle Lookup Failed", message, "VEHICLE_LOOKUP_FAILED"),
        ),
        ChargerError::NoteSubmissionFailed(_) => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::new("Note Submission Failed", message, "NOTE_SUBMISSION_FAILED"),
        ),
        ChargerError::DispenserCommandFailed(_) => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::new("Dispenser Command Failed", message, "DISPENSER_COMMAND_FAILED"),
        ),
        ChargerError::InvalidStage { stage, .. } => {
            let mut response = ErrorResponse::new("Invalid Stage", message, "INVALID_STAGE");
            response.details = Some(json!({ "stage": stage }));
            (StatusCode::CONFLICT, response)
        }
        ChargerError::InvalidDispenser { .. } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Invalid Dispenser", message, "INVALID_DISPENSER"),
        ),
        ChargerError::EmptyNote => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Bad Request", message, "EMPTY_NOTE"),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Charger(e) => {
                tracing::warn!("Charger error: {}", e);
                charger_error_response(e)
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
                )
            }

            AppError::ExternalApi(msg) => {
                tracing::warn!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message: "An error occurred while communicating with the vehicle service".to_string(),
                        details: Some(json!({ "external_api_error": msg })),
                        code: Some("EXTERNAL_API_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
