use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;

use crate::controllers::working_hours_controller::WorkingHoursController;
use crate::dto::api_response::ApiResponse;
use crate::middleware::auth::require_admin;
use crate::models::working_hours::{EffectiveHours, WorkingHours};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_working_hours_router(state: AppState) -> Router<AppState> {
    let admin = middleware::from_fn_with_state(state, require_admin);

    Router::new()
        .route(
            "/",
            get(get_working_hours).merge(put(replace_working_hours).route_layer(admin)),
        )
        .route("/:date", get(get_hours_for_date))
}

async fn get_working_hours(State(state): State<AppState>) -> Result<Json<WorkingHours>, AppError> {
    let controller = WorkingHoursController::new(&state);
    let response = controller.get().await?;
    Ok(Json(response))
}

async fn replace_working_hours(
    State(state): State<AppState>,
    Json(hours): Json<WorkingHours>,
) -> Result<Json<ApiResponse<WorkingHours>>, AppError> {
    let controller = WorkingHoursController::new(&state);
    let response = controller.replace(hours).await?;
    Ok(Json(response))
}

async fn get_hours_for_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<EffectiveHours>, AppError> {
    let controller = WorkingHoursController::new(&state);
    let response = controller.for_date(date).await?;
    Ok(Json(response))
}
