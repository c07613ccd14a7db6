use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{
    CatalogPage, CreateVehicleRequest, FacetRequest, UpdateVehicleRequest, VehicleListParams,
};
use crate::middleware::auth::require_staff;
use crate::models::vehicle::Vehicle;
use crate::services::facet_service::FacetCounts;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Lecturas públicas; escrituras solo para admin/editor
pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    let staff = middleware::from_fn_with_state(state, require_staff);

    Router::new()
        .route(
            "/",
            get(list_vehicles).merge(post(create_vehicle).route_layer(staff.clone())),
        )
        .route("/facets", post(count_facets))
        .route(
            "/:id",
            get(get_vehicle).merge(
                put(update_vehicle)
                    .delete(delete_vehicle)
                    .route_layer(staff),
            ),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<VehicleListParams>,
) -> Result<Json<CatalogPage>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list(params).await?;
    Ok(Json(response))
}

async fn count_facets(
    State(state): State<AppState>,
    Json(request): Json<FacetRequest>,
) -> Json<FacetCounts> {
    let controller = VehicleController::new(&state);
    Json(controller.facets(request).await)
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message(
        "Vehículo eliminado exitosamente".to_string(),
    )))
}
