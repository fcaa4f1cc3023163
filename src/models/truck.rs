//! Modelo de Truck
//!
//! Este módulo contiene el struct Truck y sus variantes para CRUD operations.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_plate_number;

pub type TruckId = u64;

/// Estado del camión
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TruckStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
    #[serde(other)]
    Unknown,
}

impl TruckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruckStatus::Active => "active",
            TruckStatus::Maintenance => "maintenance",
            TruckStatus::Inactive => "inactive",
            TruckStatus::Unknown => "unknown",
        }
    }
}

/// Truck principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Truck {
    pub id: TruckId,
    pub truck_number: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub status: TruckStatus,
}

impl Truck {
    /// Disponible para reservas: marcado disponible y en estado activo
    pub fn is_bookable(&self) -> bool {
        self.is_available && self.status == TruckStatus::Active
    }
}

/// Resumen de truck embebido en un trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TruckSummary {
    pub id: TruckId,
    pub truck_number: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub plate_number: Option<String>,
}

impl TruckSummary {
    /// "TRK-003 · Isuzu Elf (ABC 1234)"
    pub fn label(&self) -> String {
        let mut label = self.truck_number.clone();
        if let Some(model) = &self.model {
            label.push_str(" · ");
            label.push_str(model);
        }
        if let Some(plate) = &self.plate_number {
            label.push_str(&format!(" ({})", plate));
        }
        label
    }
}

/// Request para crear un nuevo camión
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTruckRequest {
    #[validate(length(min = 2, max = 20))]
    pub truck_number: String,

    #[validate(length(min = 2, max = 100))]
    pub model: String,

    #[validate(custom = "validate_plate_number")]
    pub plate_number: String,

    #[validate(length(min = 2, max = 50))]
    pub color: Option<String>,

    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    pub is_available: bool,

    pub status: TruckStatus,
}

/// Request para actualizar un camión existente
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTruckRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 20))]
    pub truck_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100))]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_plate_number")]
    pub plate_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 50))]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TruckStatus>,
}
