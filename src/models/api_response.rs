//! Envoltorio estándar de respuestas del backend
//!
//! `{ "success": bool, "data": ..., "message": "...", "errors": {campo: [..]} }`

use serde::{Deserialize, Serialize};

use crate::utils::errors::{missing_data_error, ApiError, AppResult, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    /// Rechaza `success: false` aunque el status HTTP haya sido 2xx
    pub fn ensure_success(self, status: u16) -> AppResult<Self> {
        if self.success {
            return Ok(self);
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| "Request was not successful".to_string());
        match self.errors {
            Some(errors) if !errors.is_empty() => Err(ApiError::Validation { message, errors }),
            _ => Err(ApiError::Api { status, message }),
        }
    }

    /// Extrae `data`; `resource` solo se usa en el mensaje de error
    pub fn into_data(self, resource: &str) -> AppResult<T> {
        self.data.ok_or_else(|| missing_data_error(resource))
    }
}
