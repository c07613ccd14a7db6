//! Consulta compuesta del catálogo
//!
//! Representación independiente del backend de almacenamiento: una lista
//! ordenada de predicados, un orden de un solo campo y un límite/offset.
//! El repositorio Postgres la traduce a SQL; el repositorio en memoria la
//! evalúa directamente.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::vehicle::Vehicle;

/// Campos del vehículo sobre los que se puede filtrar u ordenar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    Make,
    Model,
    Year,
    Price,
    Mileage,
    FuelType,
    Badge,
    CreatedAt,
}

impl CatalogField {
    /// Columna SQL (lista cerrada, nunca viene del usuario)
    pub fn column(&self) -> &'static str {
        match self {
            CatalogField::Make => "make",
            CatalogField::Model => "model",
            CatalogField::Year => "year",
            CatalogField::Price => "price",
            CatalogField::Mileage => "mileage",
            CatalogField::FuelType => "fuel_type",
            CatalogField::Badge => "badge",
            CatalogField::CreatedAt => "created_at",
        }
    }
}

/// Campos aceptados para ordenar
impl FromStr for CatalogField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(CatalogField::Price),
            "year" => Ok(CatalogField::Year),
            "mileage" => Ok(CatalogField::Mileage),
            "make" => Ok(CatalogField::Make),
            "created_at" | "createdAt" => Ok(CatalogField::CreatedAt),
            other => Err(format!("Campo de orden no soportado: '{}'", other)),
        }
    }
}

/// Valor escalar de un campo
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Decimal(a), FieldValue::Decimal(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
            (FieldValue::Decimal(a), FieldValue::Integer(b)) => Some(a.cmp(&Decimal::from(*b))),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Condición de filtro simple (igualdad o rango)
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals(CatalogField, FieldValue),
    AtLeast(CatalogField, FieldValue),
    AtMost(CatalogField, FieldValue),
}

impl Predicate {
    pub fn field(&self) -> CatalogField {
        match self {
            Predicate::Equals(field, _) | Predicate::AtLeast(field, _) | Predicate::AtMost(field, _) => {
                *field
            }
        }
    }

    pub fn value(&self) -> &FieldValue {
        match self {
            Predicate::Equals(_, value) | Predicate::AtLeast(_, value) | Predicate::AtMost(_, value) => {
                value
            }
        }
    }

    /// Operador SQL
    pub fn operator(&self) -> &'static str {
        match self {
            Predicate::Equals(..) => "=",
            Predicate::AtLeast(..) => ">=",
            Predicate::AtMost(..) => "<=",
        }
    }

    /// Evaluar el predicado contra un vehículo en memoria
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let Some(actual) = vehicle.field_value(self.field()) else {
            return false;
        };
        match (self, actual.compare(self.value())) {
            (Predicate::Equals(..), Some(ordering)) => ordering == Ordering::Equal,
            (Predicate::AtLeast(..), Some(ordering)) => ordering != Ordering::Less,
            (Predicate::AtMost(..), Some(ordering)) => ordering != Ordering::Greater,
            (_, None) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Dirección de orden no soportada: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: CatalogField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: CatalogField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Comparar dos vehículos según este orden; valores ausentes al final
    pub fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        let ordering = match (a.field_value(self.field), b.field_value(self.field)) {
            (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Consulta completa contra la colección de vehículos
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleQuery {
    pub predicates: Vec<Predicate>,
    pub sort: SortSpec,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_parsing() {
        assert_eq!("price".parse::<CatalogField>(), Ok(CatalogField::Price));
        assert_eq!("createdAt".parse::<CatalogField>(), Ok(CatalogField::CreatedAt));
        assert!("vin".parse::<CatalogField>().is_err());
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_integer_decimal_comparison() {
        let a = FieldValue::Decimal(Decimal::new(2500050, 2));
        let b = FieldValue::Integer(25000);
        assert_eq!(a.compare(&b), Some(Ordering::Greater));
        assert_eq!(
            FieldValue::Text("a".into()).compare(&FieldValue::Integer(1)),
            None
        );
    }
}
