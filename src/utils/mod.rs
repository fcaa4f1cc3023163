//! Utilidades del sistema
//!
//! Manejo de errores, validación y formateo para presentación.

pub mod errors;
pub mod format;
pub mod validation;
