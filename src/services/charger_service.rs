//! Servicio del kiosco de carga
//!
//! Dueño de la única instancia de `ChargerSession`. Traduce las acciones del
//! operador en eventos del reductor y ejecuta las llamadas externas:
//! búsqueda por QR (cambia la etapa), apertura del dispensador y nota del
//! cargador (efectos laterales de `confirmed`, sin cambio de etapa).

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clients::{DispenserGateway, FleetApi};
use crate::config::DispenserConfig;
use crate::models::charger::{ChargerEvent, DispenserNumber, DispenserOutcome, Stage};
use crate::services::charger_state_machine::{reduce, ChargerSession, PendingLookup};
use crate::utils::errors::ChargerError;

/// Límites de los dispensadores disponibles en el sitio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispenserSettings {
    pub count: u8,
    pub default_number: u8,
}

impl From<&DispenserConfig> for DispenserSettings {
    fn from(config: &DispenserConfig) -> Self {
        Self {
            count: config.count,
            default_number: config.default_number,
        }
    }
}

pub struct ChargerService {
    session: RwLock<ChargerSession>,
    fleet_api: Arc<dyn FleetApi>,
    dispenser: Arc<dyn DispenserGateway>,
    dispensers: DispenserSettings,
}

/// Aplicar un evento sobre la sesión protegida por el lock
fn apply_locked(session: &mut ChargerSession, event: ChargerEvent) {
    let current = std::mem::take(session);
    *session = reduce(current, event);
}

impl ChargerService {
    pub fn new(
        fleet_api: Arc<dyn FleetApi>,
        dispenser: Arc<dyn DispenserGateway>,
        dispensers: DispenserSettings,
    ) -> Self {
        Self {
            session: RwLock::new(ChargerSession::new()),
            fleet_api,
            dispenser,
            dispensers,
        }
    }

    /// Copia del estado actual de la sesión
    pub async fn session(&self) -> ChargerSession {
        self.session.read().await.clone()
    }

    async fn apply(&self, event: ChargerEvent) -> ChargerSession {
        let mut session = self.session.write().await;
        apply_locked(&mut session, event);
        session.clone()
    }

    pub async fn open_scanner(&self) -> ChargerSession {
        self.apply(ChargerEvent::ScannerOpened).await
    }

    pub async fn close_scanner(&self) -> ChargerSession {
        self.apply(ChargerEvent::ScannerClosed).await
    }

    /// QR decodificado: inicia la búsqueda del vehículo
    ///
    /// Si el evento se ignora (otra búsqueda en curso, vehículo ya
    /// emparejado) se devuelve la sesión sin llamar al backend. Los errores
    /// de búsqueda quedan en la sesión, nunca se propagan.
    pub async fn scan(&self, qr: &str) -> ChargerSession {
        let lookup: PendingLookup = {
            let mut session = self.session.write().await;
            let previous = session.pending_lookup().map(|p| p.seq);
            apply_locked(
                &mut session,
                ChargerEvent::QrDecoded { qr: qr.to_string() },
            );

            match session.pending_lookup() {
                Some(pending) if Some(pending.seq) != previous => pending.clone(),
                _ => {
                    debug!("⏭️ Escaneo de '{}' ignorado en etapa {}", qr, session.stage());
                    return session.clone();
                }
            }
        };

        info!("🔍 Buscando vehículo con QR '{}' (búsqueda #{})", lookup.qr, lookup.seq);

        let event = match self.fleet_api.find_by_qr(&lookup.qr).await {
            Ok(vehicle) => {
                info!("✅ Vehículo encontrado: {} ({})", vehicle.plate, vehicle.id);
                ChargerEvent::LookupSucceeded {
                    seq: lookup.seq,
                    vehicle,
                }
            }
            Err(e) => {
                warn!("❌ {} (QR '{}'): {}", ChargerError::VehicleLookupFailed, lookup.qr, e);
                ChargerEvent::LookupFailed { seq: lookup.seq }
            }
        };

        self.apply(event).await
    }

    pub async fn reject_match(&self) -> ChargerSession {
        info!("↩️ Matrícula rechazada por el operador");
        self.apply(ChargerEvent::MatchRejected).await
    }

    pub async fn confirm_match(&self) -> ChargerSession {
        info!("👍 Matrícula confirmada por el operador");
        self.apply(ChargerEvent::MatchConfirmed).await
    }

    pub async fn reset(&self) -> ChargerSession {
        info!("🔄 Sesión del kiosco reiniciada");
        self.apply(ChargerEvent::Reset).await
    }

    async fn require_confirmed(&self, operation: &'static str) -> Result<ChargerSession, ChargerError> {
        let session = self.session().await;
        if session.stage() != Stage::Confirmed {
            return Err(ChargerError::InvalidStage {
                operation,
                stage: session.stage(),
            });
        }
        Ok(session)
    }

    /// Abrir un dispensador (por defecto el configurado)
    ///
    /// Solo valida la etapa y el número; el fallo del hardware viaja en el
    /// `DispenserOutcome` y no cambia la sesión.
    pub async fn open_dispenser(
        &self,
        number: Option<u8>,
    ) -> Result<(DispenserNumber, DispenserOutcome), ChargerError> {
        self.require_confirmed("open the dispenser").await?;

        let dispenser = DispenserNumber::new(
            number.unwrap_or(self.dispensers.default_number),
            self.dispensers.count,
        )?;

        let outcome = self.dispenser.open(dispenser).await;
        if let DispenserOutcome::NotSent { reason } = &outcome {
            warn!("🚰 Dispensador {} no confirmó la apertura: {}", dispenser, reason);
        }
        Ok((dispenser, outcome))
    }

    /// Adjuntar una nota al vehículo confirmado (la última escritura gana)
    pub async fn submit_note(&self, note: &str) -> Result<(), ChargerError> {
        if note.trim().is_empty() {
            return Err(ChargerError::EmptyNote);
        }

        let session = self.require_confirmed("add a note").await?;
        let vehicle_id = match session.scanned_vehicle() {
            Some(vehicle) => vehicle.id.clone(),
            None => {
                return Err(ChargerError::InvalidStage {
                    operation: "add a note",
                    stage: session.stage(),
                })
            }
        };

        self.fleet_api
            .update_charger_note(&vehicle_id, note)
            .await
            .map_err(|e| {
                warn!("📝 Nota no guardada para {}: {}", vehicle_id, e);
                ChargerError::NoteSubmissionFailed(e.to_string())
            })?;

        info!("📝 Nota agregada al vehículo {}", vehicle_id);
        Ok(())
    }
}
