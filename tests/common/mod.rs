//! Dobles de prueba para el backend de vehículos y el dispensador
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use fleet_charger::clients::{DispenserGateway, FleetApi};
use fleet_charger::config::environment::EnvironmentConfig;
use fleet_charger::models::charger::{DispenserNumber, DispenserOutcome};
use fleet_charger::models::vehicle::{NewVehiclePayload, RawVehicle, Vehicle};
use fleet_charger::services::{ChargerService, DispenserSettings};
use fleet_charger::state::AppState;
use fleet_charger::utils::errors::ClientError;

pub fn raw_vehicle(id: &str, qr: &str, maintenances: &[&str]) -> RawVehicle {
    RawVehicle {
        id: Some(id.to_string()),
        plate_no: Some("123".to_string()),
        plate_str: Some("ABC".to_string()),
        maintenances: Some(maintenances.iter().map(|m| m.to_string()).collect()),
        qr_str: Some(qr.to_string()),
        charger_note: None,
        maintenance_period: Some(30),
    }
}

/// Pausa una búsqueda hasta que el test la libere
#[derive(Default)]
pub struct LookupGate {
    pub started: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct FakeFleetApi {
    pub vehicles: Mutex<Vec<RawVehicle>>,
    pub notes: Mutex<Vec<(String, String)>>,
    pub created: Mutex<Vec<NewVehiclePayload>>,
    pub lookups: Mutex<Vec<String>>,
    pub fail_lookups: bool,
    pub fail_notes: bool,
    pub fail_listing: bool,
    pub gate: Option<Arc<LookupGate>>,
}

impl FakeFleetApi {
    pub fn with_vehicles(vehicles: Vec<RawVehicle>) -> Self {
        Self {
            vehicles: Mutex::new(vehicles),
            ..Default::default()
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    pub fn notes(&self) -> Vec<(String, String)> {
        self.notes.lock().unwrap().clone()
    }
}

#[async_trait]
impl FleetApi for FakeFleetApi {
    async fn find_by_qr(&self, qr: &str) -> Result<Vehicle, ClientError> {
        self.lookups.lock().unwrap().push(qr.to_string());

        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        if self.fail_lookups {
            return Err(ClientError::Status {
                status: 500,
                url: format!("http://fleet.test/cars/getcar/{qr}"),
            });
        }

        let raw = self
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.qr_str.as_deref() == Some(qr))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(qr.to_string()))?;
        Ok(Vehicle::try_from(raw)?)
    }

    async fn list_vehicles(&self) -> Result<Vec<RawVehicle>, ClientError> {
        if self.fail_listing {
            return Err(ClientError::Status {
                status: 503,
                url: "http://fleet.test/cars".to_string(),
            });
        }
        Ok(self.vehicles.lock().unwrap().clone())
    }

    async fn create_vehicle(&self, payload: &NewVehiclePayload) -> Result<(), ClientError> {
        self.created.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn update_charger_note(&self, id: &str, note: &str) -> Result<(), ClientError> {
        if self.fail_notes {
            return Err(ClientError::Status {
                status: 500,
                url: format!("http://fleet.test/cars/{id}"),
            });
        }
        self.notes.lock().unwrap().push((id.to_string(), note.to_string()));
        Ok(())
    }
}

pub struct FakeDispenser {
    pub calls: Mutex<Vec<u8>>,
    pub outcome: DispenserOutcome,
}

impl FakeDispenser {
    pub fn sending() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: DispenserOutcome::Sent,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: DispenserOutcome::NotSent {
                reason: "connection refused".to_string(),
            },
        }
    }

    pub fn calls(&self) -> Vec<u8> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DispenserGateway for FakeDispenser {
    async fn open(&self, dispenser: DispenserNumber) -> DispenserOutcome {
        self.calls.lock().unwrap().push(dispenser.get());
        self.outcome.clone()
    }
}

pub fn settings() -> DispenserSettings {
    DispenserSettings {
        count: 4,
        default_number: 4,
    }
}

pub fn charger_service(fleet: Arc<FakeFleetApi>, dispenser: Arc<FakeDispenser>) -> ChargerService {
    ChargerService::new(fleet, dispenser, settings())
}

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig::from_lookup(|name| match name {
        "BACKEND_URL" => Some("http://fleet.test".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn app_state(fleet: Arc<FakeFleetApi>, dispenser: Arc<FakeDispenser>) -> AppState {
    AppState::new(test_config(), fleet, dispenser)
}
