use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{
    CatalogPage, CreateVehicleRequest, FacetRequest, UpdateVehicleRequest, VehicleListParams,
};
use crate::models::vehicle::Vehicle;
use crate::services::facet_service::FacetCounts;
use crate::services::{CatalogService, FacetService};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct VehicleController {
    catalog: CatalogService,
    facets: FacetService,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            catalog: state.catalog(),
            facets: state.facets(),
        }
    }

    pub async fn list(&self, params: VehicleListParams) -> Result<CatalogPage, AppError> {
        self.catalog.list(&params).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.catalog.get(id).await
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        let vehicle = self.catalog.create(request).await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        let vehicle = self.catalog.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.catalog.delete(id).await
    }

    pub async fn facets(&self, request: FacetRequest) -> FacetCounts {
        self.facets.count(&request.fields, &request.filters).await
    }
}
