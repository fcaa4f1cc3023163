//! Helpers de presentación
//!
//! Funciones puras para colores de estado, etiquetas y formato de fechas y
//! montos. Todas son totales: cada variante (incluida la de fallback) tiene
//! un valor.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::trip::{CargoType, TripStatus};
use crate::models::truck::TruckStatus;

const NEUTRAL: &str = "bg-gray-100 text-gray-800";

pub fn trip_status_color(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Pending => "bg-yellow-100 text-yellow-800",
        TripStatus::Assigned => "bg-blue-100 text-blue-800",
        TripStatus::InProgress => "bg-purple-100 text-purple-800",
        TripStatus::Completed => "bg-green-100 text-green-800",
        TripStatus::Cancelled => "bg-red-100 text-red-800",
        TripStatus::Unknown => NEUTRAL,
    }
}

pub fn cargo_type_color(cargo: CargoType) -> &'static str {
    match cargo {
        CargoType::General => NEUTRAL,
        CargoType::Fragile => "bg-orange-100 text-orange-800",
        CargoType::Perishable => "bg-green-100 text-green-800",
        CargoType::Hazardous => "bg-red-100 text-red-800",
        CargoType::Heavy => "bg-slate-200 text-slate-800",
        CargoType::TemperatureControlled => "bg-cyan-100 text-cyan-800",
        CargoType::Other => NEUTRAL,
    }
}

pub fn truck_status_color(status: TruckStatus) -> &'static str {
    match status {
        TruckStatus::Active => "bg-green-100 text-green-800",
        TruckStatus::Maintenance => "bg-yellow-100 text-yellow-800",
        TruckStatus::Inactive => "bg-red-100 text-red-800",
        TruckStatus::Unknown => NEUTRAL,
    }
}

pub fn status_label(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Pending => "Pending",
        TripStatus::Assigned => "Assigned",
        TripStatus::InProgress => "In Progress",
        TripStatus::Completed => "Completed",
        TripStatus::Cancelled => "Cancelled",
        TripStatus::Unknown => "Unknown",
    }
}

pub fn cargo_label(cargo: CargoType) -> &'static str {
    match cargo {
        CargoType::General => "General",
        CargoType::Fragile => "Fragile",
        CargoType::Perishable => "Perishable",
        CargoType::Hazardous => "Hazardous",
        CargoType::Heavy => "Heavy",
        CargoType::TemperatureControlled => "Temperature Controlled",
        CargoType::Other => "Other",
    }
}

/// `Aug 15, 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `August 2025`
pub fn format_month(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

/// `08:30:00` → `8:30 AM`; si no se puede interpretar se devuelve tal cual
pub fn format_time(raw: &str) -> String {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Pesos filipinos: `₱1,234.50`, `-₱20.00`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
        "{}₱{}.{}",
        if negative { "-" } else { "" },
        group_thousands(whole),
        fraction
    )
}

pub fn format_optional_currency(amount: Option<Decimal>) -> String {
    amount.map(format_currency).unwrap_or_else(|| "—".to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
