//! Conteo de facetas
//!
//! Para cada campo pedido cuenta los registros por valor, considerando solo
//! los que cumplen todos los filtros aplicados excepto el del propio campo.
//! El evaluador trabaja sobre el registro serializado (nombre de campo →
//! valor JSON), sin esquema fijo.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::repositories::VehicleStore;

/// campo → (valor → cantidad)
pub type FacetCounts = BTreeMap<String, BTreeMap<String, u64>>;

/// Filtro aplicado a un campo
#[derive(Debug, Clone, PartialEq)]
pub enum FacetFilter {
    Equals(String),
    AnyOf(Vec<String>),
}

impl FacetFilter {
    /// Interpretar un valor JSON; null, "" y [] no aplican filtro
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => {
                let keys: Vec<String> = items.iter().filter_map(value_key).collect();
                (!keys.is_empty()).then_some(FacetFilter::AnyOf(keys))
            }
            other => value_key(other)
                .filter(|key| !key.is_empty())
                .map(FacetFilter::Equals),
        }
    }

    fn accepts(&self, key: &str) -> bool {
        match self {
            FacetFilter::Equals(expected) => same_key(expected, key),
            FacetFilter::AnyOf(allowed) => allowed.iter().any(|a| same_key(a, key)),
        }
    }

    /// Un campo lista del registro cumple si alguno de sus elementos cumple
    fn matches(&self, value: &Value) -> bool {
        match value {
            Value::Array(items) => items
                .iter()
                .filter_map(value_key)
                .any(|key| self.accepts(&key)),
            other => value_key(other).map_or(false, |key| self.accepts(&key)),
        }
    }
}

/// Clave normalizada de un valor escalar; números enteros sin decimales
fn value_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(
            n.as_i64()
                .map(|i| i.to_string())
                .or_else(|| n.as_u64().map(|u| u.to_string()))
                .or_else(|| n.as_f64().map(|f| f.to_string()))
                .unwrap_or_else(|| n.to_string()),
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Igualdad de claves; "25000.50" y "25000.5" son el mismo número
fn same_key(expected: &str, key: &str) -> bool {
    if expected == key {
        return true;
    }
    match (expected.parse::<Decimal>(), key.parse::<Decimal>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn record_matches(record: &Map<String, Value>, filters: &[(String, FacetFilter)], skip: &str) -> bool {
    filters
        .iter()
        .filter(|(field, _)| field != skip)
        .all(|(field, filter)| record.get(field).map_or(false, |value| filter.matches(value)))
}

/// Contar facetas sobre registros ya serializados
pub fn count_facets(
    records: &[Map<String, Value>],
    fields: &[String],
    filters: &HashMap<String, Value>,
) -> FacetCounts {
    let filters: Vec<(String, FacetFilter)> = filters
        .iter()
        .filter_map(|(field, value)| FacetFilter::from_json(value).map(|f| (field.clone(), f)))
        .collect();

    let mut counts: FacetCounts = fields
        .iter()
        .map(|field| (field.clone(), BTreeMap::new()))
        .collect();

    for record in records {
        for field in fields {
            if !record_matches(record, &filters, field) {
                continue;
            }
            let keys: Vec<String> = match record.get(field) {
                Some(Value::Array(items)) => items.iter().filter_map(value_key).collect(),
                Some(value) => value_key(value).into_iter().collect(),
                None => Vec::new(),
            };
            let per_value = counts.entry(field.clone()).or_default();
            for key in keys {
                *per_value.entry(key).or_insert(0) += 1;
            }
        }
    }

    counts
}

#[derive(Clone)]
pub struct FacetService {
    store: Arc<dyn VehicleStore>,
}

impl FacetService {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    /// Conteos por campo; ante cualquier fallo registra el error y devuelve
    /// un mapa vacío
    pub async fn count(&self, fields: &[String], filters: &HashMap<String, Value>) -> FacetCounts {
        let vehicles = match self.store.find_all().await {
            Ok(vehicles) => vehicles,
            Err(e) => {
                error!("❌ Error leyendo vehículos para facetas: {}", e);
                return FacetCounts::new();
            }
        };

        let mut records = Vec::with_capacity(vehicles.len());
        for vehicle in &vehicles {
            match serde_json::to_value(vehicle) {
                Ok(Value::Object(map)) => records.push(map),
                Ok(_) => {
                    error!("❌ Vehículo {} no se serializa como objeto", vehicle.id);
                    return FacetCounts::new();
                }
                Err(e) => {
                    error!("❌ Error serializando vehículo {}: {}", vehicle.id, e);
                    return FacetCounts::new();
                }
            }
        }

        debug!(
            "📊 Conteo de facetas: {} registros, campos {:?}, {} filtros",
            records.len(),
            fields,
            filters.len()
        );
        count_facets(&records, fields, filters)
    }
}
