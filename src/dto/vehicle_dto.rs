use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::validation::{validate_non_negative_decimal, validate_not_blank, VIN_REGEX};

/// Imagen usada cuando el vehículo no tiene una propia
pub const PLACEHOLDER_IMAGE_URL: &str = "/images/placeholder-car.jpg";

fn default_available() -> bool {
    true
}

// Request para crear un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 60), custom = "validate_not_blank")]
    pub make: String,

    #[validate(length(min = 1, max = 60), custom = "validate_not_blank")]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(custom = "validate_non_negative_decimal")]
    pub price: Decimal,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub mileage: i64,

    #[validate(length(min = 1, max = 30))]
    pub fuel_type: String,

    #[validate(length(min = 1, max = 30))]
    pub transmission: String,

    #[validate(length(min = 1, max = 30))]
    pub drivetrain: String,

    #[validate(length(max = 40))]
    pub badge: Option<String>,

    #[validate(length(max = 120))]
    pub title: Option<String>,

    #[validate(length(max = 2048))]
    pub image_url: Option<String>,

    pub description: Option<String>,

    #[validate(regex = "VIN_REGEX")]
    pub vin: Option<String>,

    pub stock_number: Option<String>,

    #[serde(default = "default_available")]
    pub available: bool,

    #[serde(default)]
    pub features: Vec<String>,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            make: request.make.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year,
            price: request.price,
            mileage: request.mileage,
            fuel_type: request.fuel_type,
            transmission: request.transmission,
            drivetrain: request.drivetrain,
            badge: request.badge,
            title: request.title,
            image_url: request.image_url,
            description: request.description,
            vin: request.vin,
            stock_number: request.stock_number,
            available: request.available,
            features: request.features,
        }
    }
}

// Request para actualizar un vehículo (solo los campos presentes)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 60), custom = "validate_not_blank")]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 60), custom = "validate_not_blank")]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(custom = "validate_non_negative_decimal")]
    pub price: Option<Decimal>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    #[validate(length(min = 1, max = 30))]
    pub fuel_type: Option<String>,

    #[validate(length(min = 1, max = 30))]
    pub transmission: Option<String>,

    #[validate(length(min = 1, max = 30))]
    pub drivetrain: Option<String>,

    #[validate(length(max = 40))]
    pub badge: Option<String>,

    #[validate(length(max = 120))]
    pub title: Option<String>,

    #[validate(length(max = 2048))]
    pub image_url: Option<String>,

    pub description: Option<String>,

    #[validate(regex = "VIN_REGEX")]
    pub vin: Option<String>,

    pub stock_number: Option<String>,
    pub available: Option<bool>,
    pub features: Option<Vec<String>>,
}

impl UpdateVehicleRequest {
    /// Aplicar los cambios sobre el vehículo actual
    pub fn apply(self, vehicle: &mut Vehicle) {
        if let Some(make) = self.make {
            vehicle.make = make.trim().to_string();
        }
        if let Some(model) = self.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(year) = self.year {
            vehicle.year = year;
        }
        if let Some(price) = self.price {
            vehicle.price = price;
        }
        if let Some(mileage) = self.mileage {
            vehicle.mileage = mileage;
        }
        if let Some(fuel_type) = self.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
        if let Some(transmission) = self.transmission {
            vehicle.transmission = transmission;
        }
        if let Some(drivetrain) = self.drivetrain {
            vehicle.drivetrain = drivetrain;
        }
        if let Some(available) = self.available {
            vehicle.available = available;
        }
        if let Some(features) = self.features {
            vehicle.features = features;
        }
        vehicle.badge = self.badge.or(vehicle.badge.take());
        vehicle.title = self.title.or(vehicle.title.take());
        vehicle.image_url = self.image_url.or(vehicle.image_url.take());
        vehicle.description = self.description.or(vehicle.description.take());
        vehicle.vin = self.vin.or(vehicle.vin.take());
        vehicle.stock_number = self.stock_number.or(vehicle.stock_number.take());
        vehicle.updated_at = Utc::now();
    }
}

/// Parámetros vacíos de formulario (`?min_price=`) cuentan como ausentes
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Parámetros de query del listado del catálogo
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleListParams {
    pub make: Option<String>,
    pub model: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_mileage: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_mileage: Option<i64>,
    pub fuel_type: Option<String>,
    pub badge: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u32>,
}

/// Registro de presentación para las tarjetas del catálogo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCard {
    pub id: Uuid,
    pub image_url: String,
    pub title: String,
    pub price: Decimal,
    pub mileage: i64,
    pub fuel_type: String,
    pub transmission: String,
    pub drivetrain: String,
    pub badge: Option<String>,
}

impl From<&Vehicle> for VehicleCard {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            image_url: vehicle
                .image_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            title: vehicle.display_title(),
            price: vehicle.price,
            mileage: vehicle.mileage,
            fuel_type: vehicle.fuel_type.clone(),
            transmission: vehicle.transmission.clone(),
            drivetrain: vehicle.drivetrain.clone(),
            badge: vehicle.badge.clone(),
        }
    }
}

/// Página del catálogo; `total` es el tamaño de la colección sin filtros
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<VehicleCard>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

/// Request de conteo de facetas
#[derive(Debug, Clone, Deserialize)]
pub struct FacetRequest {
    pub fields: Vec<String>,
    #[serde(default)]
    pub filters: HashMap<String, serde_json::Value>,
}
