//! Trucking Portal
//!
//! Núcleo del portal de logística: cliente REST tipado, sesión persistida,
//! rutas con permisos por rol y los modelos de vista del calendario de
//! trips y de la asignación de conductores.

pub mod client;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;
pub mod views;

pub use client::ApiClient;
pub use config::EnvironmentConfig;
pub use state::AppState;
pub use utils::errors::{ApiError, AppResult};
