//! Modelo de Driver
//!
//! Conductores de la flota. Solo los activos se ofrecen para asignación.

use serde::{Deserialize, Serialize};

pub type DriverId = u64;

/// Driver principal - listado de `GET /drivers`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub id: DriverId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub license_expiry: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn summary(&self) -> DriverSummary {
        DriverSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Resumen de driver embebido en un trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverSummary {
    pub id: DriverId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl DriverSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Filtra los drivers activos conservando el orden del backend
pub fn active_drivers(drivers: Vec<Driver>) -> Vec<Driver> {
    drivers.into_iter().filter(|d| d.is_active).collect()
}
