//! Servicio de administración de la flota
//!
//! Construye las filas de la tabla de vehículos (con el estado de
//! mantenimiento) y registra vehículos nuevos en el backend.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::clients::FleetApi;
use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleRowResponse};
use crate::models::vehicle::Vehicle;
use crate::services::maintenance_service::evaluate_maintenance;
use crate::utils::errors::{AppResult, MaintenanceError};

/// Marcador para celdas sin datos
pub const PLACEHOLDER: &str = "-";

pub struct FleetService {
    fleet_api: Arc<dyn FleetApi>,
}

/// Fila de la tabla para un vehículo, evaluada respecto a `today`
pub fn vehicle_row(vehicle: &Vehicle, today: NaiveDate) -> VehicleRowResponse {
    let (last_maintenance_date, remaining, needs_maintenance) =
        match evaluate_maintenance(&vehicle.maintenances, vehicle.maintenance_period, today) {
            Ok(status) => (
                status.last_maintenance.format("%d/%m/%Y").to_string(),
                status.display().to_string(),
                Some(status.is_due),
            ),
            Err(MaintenanceError::NoMaintenanceHistory) => {
                warn!("🛠️ Vehículo {} sin historial de mantenimiento", vehicle.id);
                (PLACEHOLDER.to_string(), PLACEHOLDER.to_string(), None)
            }
        };

    VehicleRowResponse {
        id: vehicle.id.clone(),
        plate: vehicle.plate.to_string(),
        last_maintenance_date,
        maintenance_period: vehicle.maintenance_period,
        remaining,
        needs_maintenance,
        qr_str: vehicle.qr_str.clone(),
        charger_note: vehicle.charger_note.clone(),
    }
}

impl FleetService {
    pub fn new(fleet_api: Arc<dyn FleetApi>) -> Self {
        Self { fleet_api }
    }

    /// Tabla de vehículos; los registros malformados se omiten
    pub async fn list_rows(&self, today: NaiveDate) -> AppResult<Vec<VehicleRowResponse>> {
        let records = self.fleet_api.list_vehicles().await?;
        let total = records.len();

        let rows: Vec<VehicleRowResponse> = records
            .into_iter()
            .filter_map(|raw| {
                let id = raw.id.clone().unwrap_or_default();
                match Vehicle::try_from(raw) {
                    Ok(vehicle) => Some(vehicle_row(&vehicle, today)),
                    Err(e) => {
                        warn!("⚠️ Registro de vehículo '{}' omitido: {}", id, e);
                        None
                    }
                }
            })
            .collect();

        info!("📋 {} de {} vehículos listados", rows.len(), total);
        Ok(rows)
    }

    /// Registrar un vehículo nuevo
    pub async fn register(&self, request: CreateVehicleRequest) -> AppResult<()> {
        request.validate()?;

        let payload = request.into_payload();
        self.fleet_api.create_vehicle(&payload).await?;

        info!("🚗 Vehículo registrado con QR '{}'", payload.qr_str);
        Ok(())
    }
}
