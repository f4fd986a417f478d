//! Cliente HTTP para la API de vehículos
//!
//! Este módulo contiene el cliente reqwest para el backend remoto de la flota
//! (`{BACKEND_URL}/cars`).

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

use super::FleetApi;
use crate::models::vehicle::{ChargerNoteUpdate, NewVehiclePayload, RawVehicle, Vehicle, VehicleEnvelope};
use crate::utils::errors::ClientError;

/// Cliente HTTP para la API de vehículos
#[derive(Debug, Clone)]
pub struct FleetApiClient {
    client: Client,
    base_url: String,
}

/// Convertir un status no exitoso en error
fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

impl FleetApiClient {
    /// Crear nuevo cliente con la URL base del backend
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn lookup_url(&self, qr: &str) -> String {
        format!("{}/cars/getcar/{}", self.base_url, urlencoding::encode(qr))
    }

    fn collection_url(&self) -> String {
        format!("{}/cars", self.base_url)
    }

    fn vehicle_url(&self, id: &str) -> String {
        format!("{}/cars/{}", self.base_url, urlencoding::encode(id))
    }
}

#[async_trait]
impl FleetApi for FleetApiClient {
    async fn find_by_qr(&self, qr: &str) -> Result<Vehicle, ClientError> {
        let url = self.lookup_url(qr);
        debug!("🔍 GET {}", url);

        let response = ensure_success(self.client.get(&url).send().await?)?;
        let envelope: VehicleEnvelope = response.json().await?;

        let raw = envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(qr.to_string()))?;

        Ok(Vehicle::try_from(raw)?)
    }

    async fn list_vehicles(&self) -> Result<Vec<RawVehicle>, ClientError> {
        let url = self.collection_url();
        debug!("📋 GET {}", url);

        let response = ensure_success(self.client.get(&url).send().await?)?;
        let envelope: VehicleEnvelope = response.json().await?;

        Ok(envelope.data)
    }

    async fn create_vehicle(&self, payload: &NewVehiclePayload) -> Result<(), ClientError> {
        let url = self.collection_url();
        info!("🚗 POST {} (QR '{}')", url, payload.qr_str);

        ensure_success(self.client.post(&url).json(payload).send().await?)?;
        Ok(())
    }

    async fn update_charger_note(&self, id: &str, note: &str) -> Result<(), ClientError> {
        let url = self.vehicle_url(id);
        info!("📝 PUT {}", url);

        let body = ChargerNoteUpdate {
            charger_note: note.to_string(),
        };
        ensure_success(self.client.put(&url).json(&body).send().await?)?;
        Ok(())
    }
}
