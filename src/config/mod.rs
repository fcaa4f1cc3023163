//! Configuración del proyecto
//!
//! Variables de entorno del cliente (URL del backend, timeouts, sesión).

pub mod environment;

pub use environment::*;
