//! Repositorios en memoria
//!
//! Implementan los mismos traits que los repositorios Postgres. Se usan en
//! los tests y en desarrollo local sin base de datos.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::admin_repository::AdminStore;
use super::inquiry_repository::InquiryStore;
use super::vehicle_repository::VehicleStore;
use super::working_hours_repository::WorkingHoursStore;
use crate::models::admin::Admin;
use crate::models::catalog::VehicleQuery;
use crate::models::inquiry::{Inquiry, InquiryStatus, NewInquiry};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::models::working_hours::WorkingHours;
use crate::utils::errors::AppResult;

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleRepository {
    async fn query(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut matching: Vec<Vehicle> = vehicles
            .iter()
            .filter(|v| query.predicates.iter().all(|p| p.matches(v)))
            .cloned()
            .collect();

        matching.sort_by(|a, b| query.sort.compare(a, b).then_with(|| a.id.cmp(&b.id)));

        Ok(matching
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }

    async fn count_all(&self) -> AppResult<i64> {
        Ok(self.vehicles.read().await.len() as i64)
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.vehicles.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicles.read().await.iter().find(|v| v.id == id).cloned())
    }

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let vehicle = Vehicle::from_new(Uuid::new_v4(), vehicle, Utc::now());
        self.vehicles.write().await.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(stored) => {
                *stored = vehicle.clone();
                Ok(Some(vehicle.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        Ok(vehicles.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryInquiryRepository {
    inquiries: RwLock<Vec<Inquiry>>,
}

impl InMemoryInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InquiryStore for InMemoryInquiryRepository {
    async fn insert(&self, inquiry: NewInquiry) -> AppResult<Inquiry> {
        let inquiry = Inquiry::from_new(Uuid::new_v4(), inquiry, Utc::now());
        self.inquiries.write().await.push(inquiry.clone());
        Ok(inquiry)
    }

    async fn list(&self, status: Option<InquiryStatus>) -> AppResult<Vec<Inquiry>> {
        let inquiries = self.inquiries.read().await;
        // Insertadas en orden cronológico: invertir da las más recientes primero
        Ok(inquiries
            .iter()
            .rev()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> AppResult<Option<Inquiry>> {
        let mut inquiries = self.inquiries.write().await;
        Ok(inquiries.iter_mut().find(|i| i.id == id).map(|inquiry| {
            inquiry.status = status;
            inquiry.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut inquiries = self.inquiries.write().await;
        let before = inquiries.len();
        inquiries.retain(|i| i.id != id);
        Ok(inquiries.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryWorkingHoursRepository {
    hours: RwLock<Option<WorkingHours>>,
}

impl InMemoryWorkingHoursRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkingHoursStore for InMemoryWorkingHoursRepository {
    async fn get(&self) -> AppResult<Option<WorkingHours>> {
        Ok(self.hours.read().await.clone())
    }

    async fn save(&self, hours: &WorkingHours) -> AppResult<WorkingHours> {
        *self.hours.write().await = Some(hours.clone());
        Ok(hours.clone())
    }
}

#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: RwLock<Vec<Admin>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admins(admins: Vec<Admin>) -> Self {
        Self {
            admins: RwLock::new(admins),
        }
    }
}

#[async_trait]
impl AdminStore for InMemoryAdminRepository {
    async fn find_by_auth_uid(&self, auth_uid: &str) -> AppResult<Option<Admin>> {
        Ok(self
            .admins
            .read()
            .await
            .iter()
            .find(|a| a.auth_uid == auth_uid)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Admin>> {
        let mut admins = self.admins.read().await.clone();
        admins.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(admins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{CatalogField, FieldValue, Predicate, SortDirection, SortSpec};
    use rust_decimal::Decimal;

    fn new_vehicle(make: &str, price: i64, year: i32) -> NewVehicle {
        NewVehicle {
            make: make.to_string(),
            model: "Base".to_string(),
            year,
            price: Decimal::new(price, 0),
            mileage: 1000,
            fuel_type: "petrol".to_string(),
            transmission: "automatic".to_string(),
            drivetrain: "fwd".to_string(),
            badge: None,
            title: None,
            image_url: None,
            description: None,
            vin: None,
            stock_number: None,
            available: true,
            features: vec![],
        }
    }

    #[tokio::test]
    async fn test_query_filters_sorts_and_pages() {
        let repo = InMemoryVehicleRepository::new();
        repo.insert(new_vehicle("Toyota", 25000, 2020)).await.unwrap();
        repo.insert(new_vehicle("Toyota", 18000, 2018)).await.unwrap();
        repo.insert(new_vehicle("Honda", 32000, 2022)).await.unwrap();

        let query = VehicleQuery {
            predicates: vec![Predicate::Equals(
                CatalogField::Make,
                FieldValue::Text("Toyota".to_string()),
            )],
            sort: SortSpec {
                field: CatalogField::Price,
                direction: SortDirection::Asc,
            },
            limit: 1,
            offset: 1,
        };

        let page = repo.query(&query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].price, Decimal::new(25000, 0));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_ids() {
        let repo = InMemoryVehicleRepository::new();
        let mut vehicle = repo.insert(new_vehicle("Mazda", 21000, 2019)).await.unwrap();

        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());

        vehicle.id = Uuid::new_v4();
        assert!(repo.update(&vehicle).await.unwrap().is_none());
        assert_eq!(repo.count_all().await.unwrap(), 1);
    }
}
