//! Modelo de Trip
//!
//! Un trip es un transporte programado: ruta, carga, camión asignado
//! (siempre uno) y conductor opcional hasta que el admin lo asigna.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::driver::{DriverId, DriverSummary};
use crate::models::truck::{TruckId, TruckSummary};
use crate::utils::validation::validate_phone;

pub type TripId = u64;

/// Estado del trip: pending → assigned → in_progress → completed, o cancelled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Pending => "pending",
            TripStatus::Assigned => "assigned",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
            TripStatus::Unknown => "unknown",
        }
    }
}

/// Tipo de carga
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CargoType {
    #[default]
    General,
    Fragile,
    Perishable,
    Hazardous,
    Heavy,
    TemperatureControlled,
    #[serde(other)]
    Other,
}

impl CargoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CargoType::General => "general",
            CargoType::Fragile => "fragile",
            CargoType::Perishable => "perishable",
            CargoType::Hazardous => "hazardous",
            CargoType::Heavy => "heavy",
            CargoType::TemperatureControlled => "temperature_controlled",
            CargoType::Other => "other",
        }
    }
}

/// Trip tal como lo devuelve el backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub trip_code: String,
    #[serde(with = "calendar_date")]
    pub trip_date: NaiveDate,
    pub client_name: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    pub departure_location: String,
    pub destination: String,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub estimated_arrival_time: Option<String>,
    #[serde(default)]
    pub cargo_description: Option<String>,
    #[serde(default)]
    pub cargo_weight: Option<Decimal>,
    #[serde(default)]
    pub cargo_type: CargoType,
    pub truck_id: TruckId,
    pub truck: TruckSummary,
    #[serde(default)]
    pub driver_id: Option<DriverId>,
    #[serde(default)]
    pub driver: Option<DriverSummary>,
    pub status: TripStatus,
    #[serde(default)]
    pub estimated_cost: Option<Decimal>,
    #[serde(default)]
    pub actual_cost: Option<Decimal>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

impl Trip {
    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    /// "Manila → Cebu"
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.departure_location, self.destination)
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.trip_date == date
    }
}

/// Request para crear un trip (admin) o una reserva (client)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[serde(with = "calendar_date")]
    pub trip_date: NaiveDate,

    #[validate(length(min = 2, max = 100))]
    pub client_name: String,

    #[validate(email)]
    pub client_email: Option<String>,

    #[validate(custom = "validate_phone")]
    pub client_phone: Option<String>,

    #[validate(length(min = 2, max = 255))]
    pub departure_location: String,

    #[validate(length(min = 2, max = 255))]
    pub destination: String,

    pub departure_time: Option<String>,

    #[validate(length(max = 500))]
    pub cargo_description: Option<String>,

    pub cargo_weight: Option<Decimal>,

    pub cargo_type: CargoType,

    pub truck_id: TruckId,

    pub driver_id: Option<DriverId>,

    pub estimated_cost: Option<Decimal>,

    #[validate(length(max = 1000))]
    pub special_instructions: Option<String>,
}

/// Request para actualizar un trip existente; solo se envían los campos presentes
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTripRequest {
    #[serde(skip_serializing_if = "Option::is_none", with = "optional_calendar_date", default)]
    pub trip_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 255))]
    pub departure_location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 255))]
    pub destination: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck_id: Option<TruckId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TripStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub special_instructions: Option<String>,
}

/// Body de `PUT /trips/{id}/assign-driver`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignDriverRequest {
    pub driver_id: DriverId,
}

/// (De)serialización de fechas de calendario; acepta también datetimes ISO
pub(crate) mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::utils::validation::parse_date;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
    }
}

pub(crate) mod optional_calendar_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::utils::validation::parse_date;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.is_empty() => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw))),
            _ => Ok(None),
        }
    }
}
