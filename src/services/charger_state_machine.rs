//! Máquina de estados del kiosco de carga
//!
//! La sesión solo cambia a través de `reduce(session, event)`. Los campos son
//! privados a este módulo, así que ningún otro código puede escribirla.
//!
//! ```text
//! awaiting-scan --QrDecoded + LookupSucceeded--> confirming-match
//! confirming-match --MatchRejected--> awaiting-scan
//! confirming-match --MatchConfirmed--> confirmed
//! * --Reset--> awaiting-scan
//! ```
//!
//! Cada búsqueda lleva un número de secuencia. Una respuesta cuyo número no
//! coincide con la búsqueda pendiente (porque hubo un reset entretanto) se
//! descarta. El contador sobrevive al reset.

use tracing::debug;

use crate::models::charger::{ChargerEvent, Stage};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::ChargerError;
use crate::utils::validation::normalize_qr;

/// Búsqueda de vehículo en curso
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub seq: u64,
    pub qr: String,
}

/// Estado de la sesión del kiosco
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargerSession {
    stage: Stage,
    scanned_vehicle: Option<Vehicle>,
    error: Option<ChargerError>,
    scanner_open: bool,
    pending_lookup: Option<PendingLookup>,
    next_seq: u64,
}

impl Default for ChargerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChargerSession {
    pub fn new() -> Self {
        Self {
            stage: Stage::AwaitingScan,
            scanned_vehicle: None,
            error: None,
            scanner_open: false,
            pending_lookup: None,
            next_seq: 1,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn scanned_vehicle(&self) -> Option<&Vehicle> {
        self.scanned_vehicle.as_ref()
    }

    pub fn error(&self) -> Option<&ChargerError> {
        self.error.as_ref()
    }

    pub fn scanner_open(&self) -> bool {
        self.scanner_open
    }

    pub fn pending_lookup(&self) -> Option<&PendingLookup> {
        self.pending_lookup.as_ref()
    }

    fn is_pending(&self, seq: u64) -> bool {
        self.pending_lookup.as_ref().is_some_and(|p| p.seq == seq)
    }
}

fn ignored(session: &ChargerSession, event: &'static str, reason: &str) {
    debug!("⏭️ Evento '{}' ignorado en etapa {}: {}", event, session.stage, reason);
}

/// Aplicar un evento a la sesión y devolver la sesión resultante
pub fn reduce(session: ChargerSession, event: ChargerEvent) -> ChargerSession {
    let mut next = session;
    let name = event.name();

    match event {
        ChargerEvent::ScannerOpened => {
            if next.stage == Stage::AwaitingScan {
                next.scanner_open = true;
            } else {
                ignored(&next, name, "scanner only opens while awaiting a scan");
            }
        }

        ChargerEvent::ScannerClosed => {
            next.scanner_open = false;
        }

        ChargerEvent::QrDecoded { qr } => {
            if next.stage != Stage::AwaitingScan {
                ignored(&next, name, "a vehicle is already matched");
                return next;
            }
            if next.pending_lookup.is_some() {
                ignored(&next, name, "a lookup is already in flight");
                return next;
            }
            let Some(qr) = normalize_qr(&qr) else {
                ignored(&next, name, "empty QR payload");
                return next;
            };

            next.pending_lookup = Some(PendingLookup { seq: next.next_seq, qr });
            next.next_seq += 1;
        }

        ChargerEvent::LookupSucceeded { seq, vehicle } => {
            if !next.is_pending(seq) {
                ignored(&next, name, "stale lookup response");
                return next;
            }
            next.pending_lookup = None;
            next.stage = Stage::ConfirmingMatch;
            next.scanned_vehicle = Some(vehicle);
            next.error = None;
            next.scanner_open = false;
        }

        ChargerEvent::LookupFailed { seq } => {
            if !next.is_pending(seq) {
                ignored(&next, name, "stale lookup response");
                return next;
            }
            next.pending_lookup = None;
            next.scanned_vehicle = None;
            next.error = Some(ChargerError::VehicleLookupFailed);
        }

        ChargerEvent::MatchRejected => {
            if next.stage == Stage::ConfirmingMatch {
                next.stage = Stage::AwaitingScan;
                next.scanned_vehicle = None;
                next.scanner_open = false;
            } else {
                ignored(&next, name, "nothing to reject");
            }
        }

        ChargerEvent::MatchConfirmed => {
            if next.stage == Stage::ConfirmingMatch {
                next.stage = Stage::Confirmed;
            } else {
                ignored(&next, name, "nothing to confirm");
            }
        }

        ChargerEvent::Reset => {
            next = ChargerSession {
                next_seq: next.next_seq,
                ..ChargerSession::new()
            };
        }
    }

    next
}
