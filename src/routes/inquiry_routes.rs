use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::inquiry_controller::InquiryController;
use crate::dto::api_response::ApiResponse;
use crate::dto::inquiry_dto::{CreateInquiryRequest, InquiryListParams, UpdateInquiryStatusRequest};
use crate::middleware::auth::require_staff;
use crate::models::inquiry::Inquiry;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Envío público; gestión solo para admin/editor
pub fn create_inquiry_router(state: AppState) -> Router<AppState> {
    let staff = middleware::from_fn_with_state(state, require_staff);

    Router::new()
        .route(
            "/",
            post(create_inquiry).merge(get(list_inquiries).route_layer(staff.clone())),
        )
        .route("/:id/status", patch(update_inquiry_status).route_layer(staff.clone()))
        .route("/:id", delete(delete_inquiry).route_layer(staff))
}

async fn create_inquiry(
    State(state): State<AppState>,
    Json(request): Json<CreateInquiryRequest>,
) -> Result<Json<ApiResponse<Inquiry>>, AppError> {
    let controller = InquiryController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_inquiries(
    State(state): State<AppState>,
    Query(params): Query<InquiryListParams>,
) -> Result<Json<Vec<Inquiry>>, AppError> {
    let controller = InquiryController::new(&state);
    let response = controller.list(params).await?;
    Ok(Json(response))
}

async fn update_inquiry_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInquiryStatusRequest>,
) -> Result<Json<ApiResponse<Inquiry>>, AppError> {
    let controller = InquiryController::new(&state);
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}

async fn delete_inquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = InquiryController::new(&state);
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message(
        "Consulta eliminada exitosamente".to_string(),
    )))
}
