//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: backend de vehículos,
//! servidor HTTP y dispensadores.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::clients::dispenser_client::DEFAULT_DISPENSER_HOST;
use crate::utils::errors::ConfigError;

/// Configuración de los dispensadores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispenserConfig {
    pub host: String,
    pub count: u8,
    pub default_number: u8,
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

/// Configuración del entorno
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub backend_url: String,
    pub cors_origins: Vec<String>,
    pub http_timeout_secs: u64,
    pub dispenser: DispenserConfig,
}

fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("BACKEND_URL"))?;
        if reqwest::Url::parse(&backend_url).is_err() {
            return Err(ConfigError::Invalid {
                name: "BACKEND_URL",
                value: backend_url,
            });
        }

        let count: u8 = parse_or(&lookup, "DISPENSER_COUNT", 4)?;
        if count == 0 {
            return Err(ConfigError::Invalid {
                name: "DISPENSER_COUNT",
                value: count.to_string(),
            });
        }
        let default_number: u8 = parse_or(&lookup, "DEFAULT_DISPENSER", count.min(4))?;
        if default_number == 0 || default_number > count {
            return Err(ConfigError::Invalid {
                name: "DEFAULT_DISPENSER",
                value: default_number.to_string(),
            });
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            backend_url,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            http_timeout_secs: parse_or(&lookup, "HTTP_TIMEOUT_SECS", 30)?,
            dispenser: DispenserConfig {
                host: lookup("DISPENSER_HOST").unwrap_or_else(|| DEFAULT_DISPENSER_HOST.to_string()),
                count,
                default_number,
                timeout_secs: parse_or(&lookup, "DISPENSER_TIMEOUT_SECS", 5)?,
                accept_invalid_certs: parse_or(&lookup, "DISPENSER_ACCEPT_INVALID_CERTS", false)?,
            },
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl DispenserConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
