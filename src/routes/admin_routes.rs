use axum::{extract::State, middleware, routing::get, Extension, Json, Router};

use crate::controllers::admin_controller::AdminController;
use crate::middleware::auth::{require_admin, require_staff, AuthenticatedAdmin};
use crate::models::admin::Admin;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(get_me).route_layer(middleware::from_fn_with_state(state.clone(), require_staff)),
        )
        .route(
            "/users",
            get(list_admins).route_layer(middleware::from_fn_with_state(state, require_admin)),
        )
}

async fn get_me(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
) -> Result<Json<Admin>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.me(&admin.auth_uid).await?;
    Ok(Json(response))
}

async fn list_admins(State(state): State<AppState>) -> Result<Json<Vec<Admin>>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}
