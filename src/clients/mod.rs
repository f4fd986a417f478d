//! Clients - HTTP Clients for External APIs
//!
//! This module contains the contracts the charger flow depends on and the
//! reqwest clients that implement them against the vehicle REST API and the
//! dispenser controller.

pub mod dispenser_client;
pub mod fleet_api_client;

use async_trait::async_trait;

use crate::models::charger::{DispenserNumber, DispenserOutcome};
use crate::models::vehicle::{NewVehiclePayload, RawVehicle, Vehicle};
use crate::utils::errors::ClientError;

pub use dispenser_client::HttpDispenserClient;
pub use fleet_api_client::FleetApiClient;

/// Remote vehicle REST API
#[async_trait]
pub trait FleetApi: Send + Sync {
    /// `GET /cars/getcar/{qr}`: first record of the response, normalized
    async fn find_by_qr(&self, qr: &str) -> Result<Vehicle, ClientError>;

    /// `GET /cars`: raw records, normalization is left to the caller
    async fn list_vehicles(&self) -> Result<Vec<RawVehicle>, ClientError>;

    /// `POST /cars`
    async fn create_vehicle(&self, payload: &NewVehiclePayload) -> Result<(), ClientError>;

    /// `PUT /cars/{id}` with `{ charger_note }`
    async fn update_charger_note(&self, id: &str, note: &str) -> Result<(), ClientError>;
}

/// Dispenser controller. Best-effort: failures are reported in the outcome,
/// never as an error.
#[async_trait]
pub trait DispenserGateway: Send + Sync {
    async fn open(&self, dispenser: DispenserNumber) -> DispenserOutcome;
}
