//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del cliente. Todas las variables son
//! opcionales; un valor presente pero mal formado es un error.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::errors::{ApiError, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub credentials_path: PathBuf,
    pub banner_dismiss_ms: u64,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api_base_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 30,
            credentials_path: PathBuf::from(".trucking_portal/session.json"),
            banner_dismiss_ms: 3000,
            log_level: "info".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Lee la configuración del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = get("API_BASE_URL")
            .unwrap_or(defaults.api_base_url)
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ApiError::Config(format!(
                "API_BASE_URL must be an http(s) URL, got '{}'",
                api_base_url
            )));
        }

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            api_base_url,
            request_timeout_secs: parse_or(get("API_TIMEOUT_SECS"), "API_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            credentials_path: get("CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_path),
            banner_dismiss_ms: parse_or(get("BANNER_DISMISS_MS"), "BANNER_DISMISS_MS", defaults.banner_dismiss_ms)?,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn banner_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.banner_dismiss_ms)
    }

    /// Nivel de logging para `tracing_subscriber`; `info` si no se reconoce
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> AppResult<T> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| ApiError::Config(format!("{} must be a valid number, got '{}'", key, value))),
        None => Ok(default),
    }
}
