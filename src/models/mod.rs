//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del dominio: vehículos de la
//! flota y los tipos del kiosco de carga.

pub mod charger;
pub mod vehicle;

pub use charger::*;
pub use vehicle::*;
