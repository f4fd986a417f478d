//! Cliente HTTP del dispensador
//!
//! El controlador del dispensador expone `GET https://{host}/Charger{n}_ON`
//! sin contrato de respuesta. El comando es best-effort: cualquier fallo se
//! registra y se devuelve como `DispenserOutcome::NotSent`.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use super::DispenserGateway;
use crate::models::charger::{DispenserNumber, DispenserOutcome};
use crate::utils::errors::{ChargerError, ClientError};

/// Dirección histórica del dispensador
pub const DEFAULT_DISPENSER_HOST: &str = "192.168.0.12";

#[derive(Debug, Clone)]
pub struct HttpDispenserClient {
    client: Client,
    host: String,
}

impl HttpDispenserClient {
    /// `accept_invalid_certs` es necesario con el firmware que sirve TLS autofirmado
    pub fn new(host: &str, timeout: Duration, accept_invalid_certs: bool) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            host: host.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn command_url(&self, dispenser: DispenserNumber) -> String {
        format!("https://{}/Charger{}_ON", self.host, dispenser)
    }
}

#[async_trait]
impl DispenserGateway for HttpDispenserClient {
    async fn open(&self, dispenser: DispenserNumber) -> DispenserOutcome {
        let url = self.command_url(dispenser);

        let reason = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                info!("🚰 Comando de apertura enviado al dispensador {}", dispenser);
                return DispenserOutcome::Sent;
            }
            Ok(response) => format!("dispenser answered HTTP {}", response.status()),
            Err(e) => e.to_string(),
        };

        warn!(
            "⚠️ {} (dispensador {}, {})",
            ChargerError::DispenserCommandFailed(reason.clone()),
            dispenser,
            url
        );
        DispenserOutcome::NotSent { reason }
    }
}
