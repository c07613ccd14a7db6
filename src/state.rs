//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: un store por colección, el cache opcional
//! y la configuración. Todo es de larga vida, uno por proceso.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::{CacheOperations, MemoryCache};
use crate::config::environment::EnvironmentConfig;
use crate::repositories::admin_repository::PgAdminRepository;
use crate::repositories::inquiry_repository::PgInquiryRepository;
use crate::repositories::memory::{
    InMemoryAdminRepository, InMemoryInquiryRepository, InMemoryVehicleRepository,
    InMemoryWorkingHoursRepository,
};
use crate::repositories::vehicle_repository::PgVehicleRepository;
use crate::repositories::working_hours_repository::PgWorkingHoursRepository;
use crate::repositories::{AdminStore, InquiryStore, VehicleStore, WorkingHoursStore};
use crate::services::{CatalogService, FacetService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleStore>,
    pub inquiries: Arc<dyn InquiryStore>,
    pub working_hours: Arc<dyn WorkingHoursStore>,
    pub admins: Arc<dyn AdminStore>,
    pub cache: Option<Arc<dyn CacheOperations>>,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn postgres(
        pool: PgPool,
        config: EnvironmentConfig,
        cache: Option<Arc<dyn CacheOperations>>,
    ) -> Self {
        Self {
            config,
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            inquiries: Arc::new(PgInquiryRepository::new(pool.clone())),
            working_hours: Arc::new(PgWorkingHoursRepository::new(pool.clone())),
            admins: Arc::new(PgAdminRepository::new(pool)),
            cache,
        }
    }

    /// Estado en memoria (tests y desarrollo sin base de datos)
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self {
            config,
            vehicles: Arc::new(InMemoryVehicleRepository::new()),
            inquiries: Arc::new(InMemoryInquiryRepository::new()),
            working_hours: Arc::new(InMemoryWorkingHoursRepository::new()),
            admins: Arc::new(InMemoryAdminRepository::new()),
            cache: Some(Arc::new(MemoryCache::new())),
        }
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(
            self.vehicles.clone(),
            self.cache.clone(),
            self.config.total_count_ttl,
        )
    }

    pub fn facets(&self) -> FacetService {
        FacetService::new(self.vehicles.clone())
    }
}
