//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `vehicles` con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::catalog::{CatalogField, FieldValue};

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: i64,
    pub fuel_type: String,
    pub transmission: String,
    pub drivetrain: String,
    pub badge: Option<String>,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub vin: Option<String>,
    pub stock_number: Option<String>,
    pub available: bool,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos de un vehículo antes de ser persistido (sin id ni timestamps)
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: i64,
    pub fuel_type: String,
    pub transmission: String,
    pub drivetrain: String,
    pub badge: Option<String>,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub vin: Option<String>,
    pub stock_number: Option<String>,
    pub available: bool,
    pub features: Vec<String>,
}

impl Vehicle {
    /// Valor de un campo filtrable/ordenable
    pub fn field_value(&self, field: CatalogField) -> Option<FieldValue> {
        match field {
            CatalogField::Make => Some(FieldValue::Text(self.make.clone())),
            CatalogField::Model => Some(FieldValue::Text(self.model.clone())),
            CatalogField::Year => Some(FieldValue::Integer(i64::from(self.year))),
            CatalogField::Price => Some(FieldValue::Decimal(self.price)),
            CatalogField::Mileage => Some(FieldValue::Integer(self.mileage)),
            CatalogField::FuelType => Some(FieldValue::Text(self.fuel_type.clone())),
            CatalogField::Badge => self.badge.clone().map(FieldValue::Text),
            CatalogField::CreatedAt => Some(FieldValue::Timestamp(self.created_at)),
        }
    }

    /// Título para mostrar: el guardado, o "{year} {make} {model}"
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("{} {} {}", self.year, self.make, self.model),
        }
    }

    /// Construir un vehículo persistido a partir de un NewVehicle
    pub fn from_new(id: Uuid, new: NewVehicle, now: DateTime<Utc>) -> Self {
        Self {
            id,
            make: new.make,
            model: new.model,
            year: new.year,
            price: new.price,
            mileage: new.mileage,
            fuel_type: new.fuel_type,
            transmission: new.transmission,
            drivetrain: new.drivetrain,
            badge: new.badge,
            title: new.title,
            image_url: new.image_url,
            description: new.description,
            vin: new.vin,
            stock_number: new.stock_number,
            available: new.available,
            features: new.features,
            created_at: now,
            updated_at: now,
        }
    }
}
