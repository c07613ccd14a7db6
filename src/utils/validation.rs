//! Utilidades de validación
//!
//! Patrones y funciones custom usadas por los `#[derive(Validate)]`
//! de los DTOs, más la validación estructural del horario semanal.

use std::collections::HashSet;

use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::models::working_hours::WorkingHours;

lazy_static! {
    /// VIN de 17 caracteres, sin I, O ni Q
    pub static ref VIN_REGEX: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();

    /// Hora en formato HH:MM (24h)
    pub static ref TIME_REGEX: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

/// Validar que un decimal no sea negativo
pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Convertir HH:MM a NaiveTime
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    if !TIME_REGEX.is_match(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

fn time_error(code: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.add_param("value".into(), &value.to_string());
    error.add_param("format".into(), &"HH:MM".to_string());
    error
}

/// Verifica que un par apertura/cierre sea válido (apertura < cierre)
fn check_range(
    errors: &mut ValidationErrors,
    field: &'static str,
    open: &str,
    close: &str,
) {
    match (parse_time(open), parse_time(close)) {
        (Some(o), Some(c)) if o < c => {}
        (Some(_), Some(_)) => {
            let mut error = ValidationError::new("open_before_close");
            error.add_param("open".into(), &open.to_string());
            error.add_param("close".into(), &close.to_string());
            errors.add(field, error);
        }
        (None, _) => errors.add(field, time_error("time", open)),
        (_, None) => errors.add(field, time_error("time", close)),
    }
}

/// Validar la estructura completa del horario
///
/// Exige siete días (uno por cada `day_of_week` 0..=6), horas HH:MM y
/// apertura anterior al cierre en los días abiertos y en los overrides.
pub fn validate_working_hours(hours: &WorkingHours) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_range(&mut errors, "default_hours", &hours.default_open, &hours.default_close);

    if hours.days.len() != 7 {
        let mut error = ValidationError::new("seven_days");
        error.add_param("actual".into(), &hours.days.len());
        errors.add("days", error);
    }

    let mut seen = HashSet::new();
    for day in &hours.days {
        if day.day_of_week > 6 || !seen.insert(day.day_of_week) {
            let mut error = ValidationError::new("day_of_week");
            error.add_param("value".into(), &day.day_of_week);
            errors.add("days", error);
            continue;
        }
        if day.is_open && !day.is_holiday {
            let open = day.open_time.as_deref().unwrap_or(&hours.default_open);
            let close = day.close_time.as_deref().unwrap_or(&hours.default_close);
            check_range(&mut errors, "days", open, close);
        }
    }

    for entry in &hours.overrides {
        if entry.is_open {
            let open = entry.open_time.as_deref().unwrap_or(&hours.default_open);
            let close = entry.close_time.as_deref().unwrap_or(&hours.default_close);
            check_range(&mut errors, "overrides", open, close);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
