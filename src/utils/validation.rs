//! Utilidades de validación
//!
//! Validadores custom para los formularios (usados desde `#[validate(custom = ...)]`)
//! y conversión de `ValidationErrors` al mapa de errores por campo que
//! muestran las vistas.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::FieldErrors;

lazy_static! {
    // 09XXXXXXXXX o +639XXXXXXXXX
    static ref PH_MOBILE: Regex = Regex::new(r"^(\+63|0)9\d{9}$").expect("valid phone regex");
    static ref PLATE_NUMBER: Regex =
        Regex::new(r"^[A-Z]{2,3}[ -]?\d{3,4}$").expect("valid plate regex");
}

/// Validar formato de teléfono móvil filipino
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone: String = value.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if !PH_MOBILE.is_match(&clean_phone) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de placa (ABC 1234, AB-123, ...)
pub fn validate_plate_number(value: &str) -> Result<(), ValidationError> {
    if !PLATE_NUMBER.is_match(&value.trim().to_uppercase()) {
        let mut error = ValidationError::new("plate_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value).map(|_| ()).ok_or_else(|| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Fecha de calendario a partir de `YYYY-MM-DD` o de un datetime ISO
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let head = value.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Convierte los errores de `validator` al formato `{campo: [mensajes]}`
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|error| describe(field, error))
            .collect();
        out.insert(field.to_string(), messages);
    }
    out
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let label = field.replace('_', " ");
    match error.code.as_ref() {
        "email" => format!("The {} must be a valid email address.", label),
        "length" => format!("The {} has an invalid length.", label),
        "range" => format!("The {} is out of range.", label),
        "must_match" => format!("The {} confirmation does not match.", label),
        "phone" => format!("The {} must be a valid mobile number.", label),
        "plate_number" => format!("The {} must be a valid plate number.", label),
        "date" => format!("The {} must be a date (YYYY-MM-DD).", label),
        _ => format!("The {} field is invalid.", label),
    }
}
