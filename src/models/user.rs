//! Modelo de User
//!
//! Usuario autenticado, roles del sistema y formularios de auth, perfil
//! y administración de usuarios.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::driver::DriverId;
use crate::utils::validation::validate_phone;

pub type UserId = u64;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Driver,
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Driver => "driver",
            UserRole::Client => "client",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "driver" => Some(UserRole::Driver),
            "client" => Some(UserRole::Client),
            _ => None,
        }
    }
}

/// Usuario tal como lo devuelve `GET /user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Registro de driver vinculado (solo cuentas con rol driver)
    #[serde(default)]
    pub driver_id: Option<DriverId>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Id usado para `GET /drivers/{id}/trips`
    pub fn schedule_driver_id(&self) -> DriverId {
        self.driver_id.unwrap_or(self.id)
    }
}

/// `data` de `POST /login` y `POST /register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// Request de login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request de registro
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,

    #[validate(must_match = "password")]
    pub password_confirmation: String,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,
}

/// Request para actualizar el perfil propio
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub address: Option<String>,
}

/// Request de cambio de contraseña
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,

    #[validate(must_match = "password")]
    pub password_confirmation: String,
}

/// Request para crear un usuario desde el panel de admin
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,

    pub role: UserRole,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,
}

/// Request para actualizar un usuario desde el panel de admin
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 100))]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub address: Option<String>,
}
