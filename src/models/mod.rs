//! Modelos del sistema
//!
//! Tipos que mapean exactamente los JSON del backend REST, más los bodies de
//! request con sus reglas de `validator`.

pub mod api_response;
pub mod driver;
pub mod task;
pub mod trip;
pub mod truck;
pub mod user;
