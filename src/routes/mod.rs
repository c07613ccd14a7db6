pub mod admin_routes;
pub mod inquiry_routes;
pub mod vehicle_routes;
pub mod working_hours_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la API
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router(state.clone()))
        .nest("/api/inquiries", inquiry_routes::create_inquiry_router(state.clone()))
        .nest(
            "/api/working-hours",
            working_hours_routes::create_working_hours_router(state.clone()),
        )
        .nest("/api/admin", admin_routes::create_admin_router(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "dealership-catalog",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
