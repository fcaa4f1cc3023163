//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente y su
//! conversión a mensajes que las vistas pueden mostrar.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errores por campo, tal como los devuelve el backend en `errors`
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errores principales del cliente
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unauthenticated: {0}")]
    Unauthorized(String),

    #[error("Validation error: {message}")]
    Validation { message: String, errors: FieldErrors },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response without data: {0}")]
    MissingData(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, ApiError>;

/// Cuerpo mínimo de un error del backend
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

impl ApiError {
    /// Mensaje apto para un banner; usa `fallback` cuando el error no trae uno propio
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation { message, .. } | ApiError::Api { message, .. }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            ApiError::Forbidden(msg) | ApiError::Unauthorized(msg) if !msg.trim().is_empty() => {
                msg.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Errores por campo, si los hay
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Clasifica una respuesta no exitosa a partir de su status y cuerpo.
    /// Los efectos del 401 sobre la sesión los aplica el cliente.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized(message);
        }

        match parsed.errors {
            Some(errors) if !errors.is_empty() => ApiError::Validation { message, errors },
            _ if status == StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation {
                message,
                errors: FieldErrors::new(),
            },
            _ => ApiError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation {
            message: "The given data was invalid.".to_string(),
            errors: crate::utils::validation::field_errors(&errors),
        }
    }
}

/// Función helper para crear errores de permisos
pub fn forbidden_error(operation: &str) -> ApiError {
    ApiError::Forbidden(format!("You are not allowed to {}", operation))
}

/// Función helper para crear errores de respuesta sin datos
pub fn missing_data_error(resource: &str) -> ApiError {
    ApiError::MissingData(resource.to_string())
}
