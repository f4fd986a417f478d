//! Services module
//!
//! Este módulo contiene la lógica de negocio: el evaluador de mantenimiento,
//! la máquina de estados del kiosco de carga y los servicios que coordinan
//! las llamadas al backend de vehículos y al dispensador.

pub mod charger_service;
pub mod charger_state_machine;
pub mod fleet_service;
pub mod maintenance_service;

pub use charger_service::{ChargerService, DispenserSettings};
pub use charger_state_machine::{reduce, ChargerSession, PendingLookup};
pub use fleet_service::FleetService;
pub use maintenance_service::{evaluate_maintenance, utc_today, MaintenanceDisplay, MaintenanceStatus};
