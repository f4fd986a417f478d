//! Modelos del kiosco de carga
//!
//! Etapas de la sesión, eventos que la hacen avanzar y los tipos que
//! describen el comando de apertura del dispensador.

use serde::Serialize;
use std::fmt;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::ChargerError;

/// Etapa de la sesión del kiosco
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[default]
    AwaitingScan,
    ConfirmingMatch,
    Confirmed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::AwaitingScan => "awaiting-scan",
            Stage::ConfirmingMatch => "confirming-match",
            Stage::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eventos que alimentan el reductor de la sesión
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargerEvent {
    /// El operador abre el diálogo del escáner
    ScannerOpened,
    /// El operador cierra el diálogo del escáner
    ScannerClosed,
    /// El escáner decodificó un código QR
    QrDecoded { qr: String },
    /// Respuesta de la búsqueda con número de secuencia `seq`
    LookupSucceeded { seq: u64, vehicle: Vehicle },
    LookupFailed { seq: u64 },
    /// El operador dice que la matrícula no es la correcta
    MatchRejected,
    /// El operador confirma la matrícula
    MatchConfirmed,
    Reset,
}

impl ChargerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ChargerEvent::ScannerOpened => "scanner-opened",
            ChargerEvent::ScannerClosed => "scanner-closed",
            ChargerEvent::QrDecoded { .. } => "qr-decoded",
            ChargerEvent::LookupSucceeded { .. } => "lookup-succeeded",
            ChargerEvent::LookupFailed { .. } => "lookup-failed",
            ChargerEvent::MatchRejected => "match-rejected",
            ChargerEvent::MatchConfirmed => "match-confirmed",
            ChargerEvent::Reset => "reset",
        }
    }
}

/// Número de dispensador validado (1..=cantidad configurada)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispenserNumber(u8);

impl DispenserNumber {
    pub fn new(number: u8, count: u8) -> Result<Self, ChargerError> {
        if number == 0 || number > count {
            return Err(ChargerError::InvalidDispenser { number, count });
        }
        Ok(Self(number))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DispenserNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resultado del comando de apertura (best-effort, sin acuse del hardware)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispenserOutcome {
    Sent,
    NotSent { reason: String },
}

impl DispenserOutcome {
    pub fn sent(&self) -> bool {
        matches!(self, DispenserOutcome::Sent)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            DispenserOutcome::Sent => None,
            DispenserOutcome::NotSent { reason } => Some(reason),
        }
    }
}
