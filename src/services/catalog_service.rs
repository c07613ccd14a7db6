//! Servicio de catálogo
//!
//! Traduce filtros, orden y paginación a una `VehicleQuery`, la ejecuta y
//! da forma de tarjetas a los resultados. También cubre las operaciones
//! puntuales por id.

use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;
use validator::Validate;

use crate::cache::CacheOperations;
use crate::dto::vehicle_dto::{
    CatalogPage, CreateVehicleRequest, UpdateVehicleRequest, VehicleCard, VehicleListParams,
};
use crate::models::catalog::{CatalogField, FieldValue, Predicate, SortDirection, SortSpec, VehicleQuery};
use crate::models::vehicle::Vehicle;
use crate::repositories::VehicleStore;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

const TOTAL_COUNT_KEY: &str = "vehicles:total";

/// Log de fallos del almacenamiento antes de propagarlos sin cambios
fn log_storage_failure(operation: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |e| {
        error!("❌ Error de almacenamiento en {}: {}", operation, e);
        e
    }
}

fn truthy_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn truthy<T: PartialEq + Default + Copy>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

/// Página (base 1) y tamaño de página efectivos
pub fn pagination(params: &VehicleListParams) -> (u32, u32) {
    let page_size = truthy(params.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    let page = truthy(params.page).unwrap_or(1);
    (page, page_size)
}

fn push_range(
    predicates: &mut Vec<Predicate>,
    field: CatalogField,
    min: Option<FieldValue>,
    max: Option<FieldValue>,
) {
    if let Some(min) = min {
        predicates.push(Predicate::AtLeast(field, min));
    }
    if let Some(max) = max {
        predicates.push(Predicate::AtMost(field, max));
    }
}

/// Construir la consulta del catálogo
///
/// Los predicados se agregan en orden fijo: marca, modelo, precio, año,
/// kilometraje, combustible, badge. Valores vacíos o cero se ignoran.
pub fn build_query(params: &VehicleListParams) -> AppResult<VehicleQuery> {
    let mut predicates = Vec::new();

    if let Some(make) = truthy_text(&params.make) {
        predicates.push(Predicate::Equals(CatalogField::Make, FieldValue::Text(make)));
    }
    if let Some(model) = truthy_text(&params.model) {
        predicates.push(Predicate::Equals(CatalogField::Model, FieldValue::Text(model)));
    }
    push_range(
        &mut predicates,
        CatalogField::Price,
        truthy(params.min_price).map(FieldValue::Decimal),
        truthy(params.max_price).map(FieldValue::Decimal),
    );
    push_range(
        &mut predicates,
        CatalogField::Year,
        truthy(params.min_year).map(|y| FieldValue::Integer(i64::from(y))),
        truthy(params.max_year).map(|y| FieldValue::Integer(i64::from(y))),
    );
    push_range(
        &mut predicates,
        CatalogField::Mileage,
        truthy(params.min_mileage).map(FieldValue::Integer),
        truthy(params.max_mileage).map(FieldValue::Integer),
    );
    if let Some(fuel_type) = truthy_text(&params.fuel_type) {
        predicates.push(Predicate::Equals(CatalogField::FuelType, FieldValue::Text(fuel_type)));
    }
    if let Some(badge) = truthy_text(&params.badge) {
        predicates.push(Predicate::Equals(CatalogField::Badge, FieldValue::Text(badge)));
    }

    let mut sort = SortSpec::default();
    if let Some(field) = truthy_text(&params.sort_by) {
        sort.field = field.parse().map_err(|e: String| bad_request_error(&e))?;
    }
    if let Some(direction) = truthy_text(&params.sort_order) {
        sort.direction = direction
            .parse::<SortDirection>()
            .map_err(|e| bad_request_error(&e))?;
    }

    let (page, page_size) = pagination(params);

    Ok(VehicleQuery {
        predicates,
        sort,
        limit: i64::from(page_size),
        offset: i64::from(page - 1) * i64::from(page_size),
    })
}

/// Servicio del catálogo: un store de larga vida y un cache opcional
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn VehicleStore>,
    cache: Option<Arc<dyn CacheOperations>>,
    total_count_ttl: u64,
}

impl CatalogService {
    pub fn new(
        store: Arc<dyn VehicleStore>,
        cache: Option<Arc<dyn CacheOperations>>,
        total_count_ttl: u64,
    ) -> Self {
        Self {
            store,
            cache,
            total_count_ttl,
        }
    }

    /// Página del catálogo más el conteo total sin filtros
    pub async fn list(&self, params: &VehicleListParams) -> AppResult<CatalogPage> {
        let query = build_query(params)?;
        let (page, page_size) = pagination(params);
        debug!(
            "🔍 Consulta de catálogo: {} predicados, orden {:?}, límite {}, offset {}",
            query.predicates.len(),
            query.sort,
            query.limit,
            query.offset
        );

        let vehicles = self
            .store
            .query(&query)
            .await
            .map_err(log_storage_failure("listado del catálogo"))?;
        let total = self.total_count().await?;

        Ok(CatalogPage {
            items: vehicles.iter().map(VehicleCard::from).collect(),
            total,
            page,
            page_size,
        })
    }

    /// Cache del conteo; un TTL de 0 desactiva el cacheo
    fn count_cache(&self) -> Option<&Arc<dyn CacheOperations>> {
        self.cache.as_ref().filter(|_| self.total_count_ttl > 0)
    }

    /// Tamaño de la colección completa, con cache cuando está disponible
    pub async fn total_count(&self) -> AppResult<i64> {
        if let Some(cache) = self.count_cache() {
            match cache.get(TOTAL_COUNT_KEY).await {
                Ok(Some(value)) => match value.parse::<i64>() {
                    Ok(total) => return Ok(total),
                    Err(e) => warn!("⚠️ Conteo cacheado inválido '{}': {}", value, e),
                },
                Ok(None) => {}
                Err(e) => warn!("⚠️ Error leyendo conteo del cache: {}", e),
            }
        }

        let total = self
            .store
            .count_all()
            .await
            .map_err(log_storage_failure("conteo total"))?;

        if let Some(cache) = self.count_cache() {
            if let Err(e) = cache
                .set(TOTAL_COUNT_KEY, total.to_string(), self.total_count_ttl)
                .await
            {
                warn!("⚠️ Error guardando conteo en cache: {}", e);
            }
        }

        Ok(total)
    }

    async fn invalidate_total_count(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.delete(TOTAL_COUNT_KEY).await {
                warn!("⚠️ Error invalidando conteo en cache: {}", e);
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Vehicle> {
        self.store
            .find_by_id(id)
            .await
            .map_err(log_storage_failure("lectura de vehículo"))?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let vehicle = self
            .store
            .insert(request.into())
            .await
            .map_err(log_storage_failure("creación de vehículo"))?;
        self.invalidate_total_count().await;

        Ok(vehicle)
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let mut vehicle = self.get(id).await?;
        request.apply(&mut vehicle);

        self.store
            .update(&vehicle)
            .await
            .map_err(log_storage_failure("actualización de vehículo"))?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(log_storage_failure("eliminación de vehículo"))?;
        if !deleted {
            return Err(not_found_error("Vehículo", &id.to_string()));
        }
        self.invalidate_total_count().await;

        Ok(())
    }
}
