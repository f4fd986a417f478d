//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: la configuración, la sesión del kiosco y el
//! servicio de administración de la flota.

use std::sync::Arc;
use tracing::info;

use crate::clients::{DispenserGateway, FleetApi, FleetApiClient, HttpDispenserClient};
use crate::config::environment::EnvironmentConfig;
use crate::services::{ChargerService, DispenserSettings, FleetService};
use crate::utils::errors::ClientError;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub charger: Arc<ChargerService>,
    pub fleet: Arc<FleetService>,
}

impl AppState {
    /// Construir el estado con clientes arbitrarios (los tests inyectan dobles)
    pub fn new(
        config: EnvironmentConfig,
        fleet_api: Arc<dyn FleetApi>,
        dispenser: Arc<dyn DispenserGateway>,
    ) -> Self {
        let dispensers = DispenserSettings::from(&config.dispenser);
        Self {
            charger: Arc::new(ChargerService::new(fleet_api.clone(), dispenser, dispensers)),
            fleet: Arc::new(FleetService::new(fleet_api)),
            config,
        }
    }

    /// Construir el estado con los clientes HTTP reales
    pub fn from_config(config: EnvironmentConfig) -> Result<Self, ClientError> {
        let fleet_api = FleetApiClient::new(&config.backend_url, config.http_timeout())?;
        info!("🔗 Backend de vehículos: {}", fleet_api.base_url());

        let dispenser = HttpDispenserClient::new(
            &config.dispenser.host,
            config.dispenser.timeout(),
            config.dispenser.accept_invalid_certs,
        )?;
        info!(
            "🚰 Dispensadores en {} ({} disponibles, por defecto #{})",
            config.dispenser.host, config.dispenser.count, config.dispenser.default_number
        );

        Ok(Self::new(config, Arc::new(fleet_api), Arc::new(dispenser)))
    }
}
