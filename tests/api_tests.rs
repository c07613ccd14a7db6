use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use dealership_catalog::config::EnvironmentConfig;
use dealership_catalog::models::admin::{Admin, AdminRole};
use dealership_catalog::models::catalog::VehicleQuery;
use dealership_catalog::models::vehicle::{NewVehicle, Vehicle};
use dealership_catalog::repositories::memory::InMemoryAdminRepository;
use dealership_catalog::repositories::VehicleStore;
use dealership_catalog::routes::create_app;
use dealership_catalog::state::AppState;
use dealership_catalog::utils::errors::{AppError, AppResult};
use dealership_catalog::utils::jwt::{generate_token, JwtConfig};

const SECRET: &str = "test-secret";

fn config() -> EnvironmentConfig {
    EnvironmentConfig {
        jwt_secret: SECRET.to_string(),
        ..Default::default()
    }
}

fn token(auth_uid: &str, role: &str) -> String {
    generate_token(auth_uid, role, &JwtConfig::from(&config())).unwrap()
}

fn vehicle(make: &str, model: &str, year: i32, price: i64, mileage: i64) -> NewVehicle {
    NewVehicle {
        make: make.to_string(),
        model: model.to_string(),
        year,
        price: Decimal::new(price, 0),
        mileage,
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

async fn seeded_state(vehicles: Vec<NewVehicle>) -> AppState {
    let state = AppState::in_memory(config());
    for v in vehicles {
        state.vehicles.insert(v).await.unwrap();
    }
    state
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn authed(method: Method, uri: &str, bearer: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
        .body(Body::empty())
        .unwrap()
}

/// Store que falla en todas las operaciones
struct UnavailableStore;

#[async_trait]
impl VehicleStore for UnavailableStore {
    async fn query(&self, _query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
        Err(AppError::Internal("storage down".to_string()))
    }
    async fn count_all(&self) -> AppResult<i64> {
        Err(AppError::Internal("storage down".to_string()))
    }
    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        Err(AppError::Internal("storage down".to_string()))
    }
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Vehicle>> {
        Err(AppError::Internal("storage down".to_string()))
    }
    async fn insert(&self, _vehicle: NewVehicle) -> AppResult<Vehicle> {
        Err(AppError::Internal("storage down".to_string()))
    }
    async fn update(&self, _vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        Err(AppError::Internal("storage down".to_string()))
    }
    async fn delete(&self, _id: Uuid) -> AppResult<bool> {
        Err(AppError::Internal("storage down".to_string()))
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = create_app(AppState::in_memory(config()));
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_make_filter_returns_only_matching_vehicle() {
    let app = create_app(
        seeded_state(vec![
            vehicle("Toyota", "Corolla", 2021, 25000, 30000),
            vehicle("Honda", "Civic", 2022, 32000, 12000),
        ])
        .await,
    );

    let (status, body) = send(&app, get("/api/vehicles?make=Toyota")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "2021 Toyota Corolla");
    assert_eq!(items[0]["image_url"], "/images/placeholder-car.jpg");
    // el total ignora los filtros
    assert_eq!(body["total"], 2);

    let (_, body) = send(&app, get("/api/vehicles?min_price=30000")).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price"].as_f64(), Some(32000.0));
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_blank_form_filters_return_full_list() {
    let app = create_app(
        seeded_state(vec![
            vehicle("Toyota", "Corolla", 2021, 25000, 30000),
            vehicle("Honda", "Civic", 2022, 32000, 12000),
        ])
        .await,
    );

    let (status, body) = send(
        &app,
        get("/api/vehicles?make=&model=&min_price=&max_price=&min_year=&max_year=&min_mileage=&max_mileage=&fuel_type=&badge=&sort_by=&sort_order=&page_size=&page="),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 12);

    let (status, _) = send(&app, get("/api/vehicles?min_price=cheap")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_every_item_satisfies_combined_filters() {
    let app = create_app(
        seeded_state(vec![
            vehicle("Toyota", "Corolla", 2018, 15000, 80000),
            vehicle("Toyota", "Camry", 2021, 27000, 25000),
            vehicle("Toyota", "RAV4", 2023, 36000, 5000),
            vehicle("Honda", "Civic", 2022, 24000, 15000),
        ])
        .await,
    );

    let (status, body) = send(
        &app,
        get("/api/vehicles?make=Toyota&min_year=2019&max_price=30000&max_mileage=50000&sort_by=price&sort_order=asc"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    for item in items {
        assert!(item["title"].as_str().unwrap().contains("Toyota"));
        assert!(item["price"].as_f64().unwrap() <= 30000.0);
        assert!(item["mileage"].as_i64().unwrap() <= 50000);
    }
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn test_pagination_uses_offset_and_respects_page_size() {
    let vehicles = (0..5)
        .map(|i| vehicle("Kia", &format!("Model{}", i), 2020, 10000 + i * 1000, 1000))
        .collect();
    let app = create_app(seeded_state(vehicles).await);

    let (_, first) = send(&app, get("/api/vehicles?page_size=2&page=1&sort_by=price&sort_order=asc")).await;
    let (_, second) = send(&app, get("/api/vehicles?page_size=2&page=2&sort_by=price&sort_order=asc")).await;
    let (_, last) = send(&app, get("/api/vehicles?page_size=2&page=3&sort_by=price&sort_order=asc")).await;
    let (_, beyond) = send(&app, get("/api/vehicles?page_size=2&page=9")).await;

    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_eq!(second["items"].as_array().unwrap().len(), 2);
    assert_eq!(last["items"].as_array().unwrap().len(), 1);
    assert!(beyond["items"].as_array().unwrap().is_empty());

    assert_ne!(first["items"][0]["id"], second["items"][0]["id"]);
    assert_eq!(first["items"][0]["price"].as_f64(), Some(10000.0));
    assert_eq!(second["items"][0]["price"].as_f64(), Some(12000.0));
    assert_eq!(beyond["total"], 5);
}

#[tokio::test]
async fn test_invalid_sort_field_is_bad_request() {
    let app = create_app(AppState::in_memory(config()));
    let (status, body) = send(&app, get("/api/vehicles?sort_by=vin")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_vehicle_is_not_found() {
    let app = create_app(AppState::in_memory(config()));
    let (status, body) = send(&app, get(&format!("/api/vehicles/{}", Uuid::new_v4()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_facets_exclude_the_counted_field_filter() {
    let app = create_app(
        seeded_state(vec![
            vehicle("Toyota", "Corolla", 2021, 25000, 30000),
            vehicle("Toyota", "Corolla", 2019, 19000, 60000),
            vehicle("Toyota", "RAV4", 2022, 33000, 20000),
            vehicle("Honda", "Civic", 2022, 32000, 12000),
        ])
        .await,
    );

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vehicles/facets",
            json!({ "fields": ["model", "make"], "filters": { "make": "Toyota" } }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], json!({ "Corolla": 2, "RAV4": 1 }));
    assert_eq!(body["make"], json!({ "Honda": 1, "Toyota": 3 }));
}

#[tokio::test]
async fn test_facets_return_empty_mapping_on_storage_failure() {
    let state = AppState {
        vehicles: Arc::new(UnavailableStore),
        ..AppState::in_memory(config())
    };
    let app = create_app(state);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vehicles/facets",
            json!({ "fields": ["make"] }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    // el listado, en cambio, propaga el error
    let (status, _) = send(&app, get("/api/vehicles")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_vehicle_writes_require_staff_token() {
    let app = create_app(AppState::in_memory(config()));
    let payload = json!({
        "make": "Mazda",
        "model": "CX-5",
        "year": 2023,
        "price": 29990,
        "mileage": 100,
        "fuel_type": "petrol",
        "transmission": "automatic",
        "drivetrain": "awd",
        "badge": "new-arrival"
    });

    let (status, _) = send(&app, json_request(Method::POST, "/api/vehicles", payload.clone(), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let editor = token("uid-editor", "editor");
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/vehicles", payload, Some(&editor)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/vehicles/{}", id),
            json!({ "price": 27990 }),
            Some(&editor),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"].as_f64(), Some(27990.0));
    assert_eq!(body["data"]["make"], "Mazda");

    let (_, body) = send(&app, get("/api/vehicles?badge=new-arrival")).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"], 1);

    let (status, _) = send(&app, authed(Method::DELETE, &format!("/api/vehicles/{}", id), &editor)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get(&format!("/api/vehicles/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, authed(Method::DELETE, &format!("/api/vehicles/{}", id), &editor)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_vehicle_payload_is_rejected() {
    let app = create_app(AppState::in_memory(config()));
    let editor = token("uid-editor", "editor");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vehicles",
            json!({
                "make": "Mazda",
                "model": "CX-5",
                "year": 1850,
                "price": 29990,
                "fuel_type": "petrol",
                "transmission": "automatic",
                "drivetrain": "awd"
            }),
            Some(&editor),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_role_is_forbidden() {
    let app = create_app(AppState::in_memory(config()));
    let viewer = token("uid-viewer", "viewer");

    let (status, _) = send(&app, authed(Method::GET, "/api/inquiries", &viewer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_inquiry_lifecycle() {
    let app = create_app(AppState::in_memory(config()));
    let editor = token("uid-editor", "editor");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/inquiries",
            json!({
                "first_name": "Ana",
                "last_name": "García",
                "email": "ana@example.com",
                "interest": "test-drive",
                "message": "¿Puedo probar el Corolla el sábado?",
                "consent": true
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "new");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, get("/api/inquiries")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/inquiries/{}/status", id),
            json!({ "status": "in-progress" }),
            Some(&editor),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "in-progress");

    let (_, body) = send(&app, authed(Method::GET, "/api/inquiries?status=new", &editor)).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send(&app, authed(Method::GET, "/api/inquiries?status=in-progress", &editor)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/inquiries/{}/status", Uuid::new_v4()),
            json!({ "status": "responded" }),
            Some(&editor),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, authed(Method::DELETE, &format!("/api/inquiries/{}", id), &editor)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_working_hours_defaults_and_admin_replace() {
    let app = create_app(AppState::in_memory(config()));

    let (status, mut hours) = send(&app, get("/api/working-hours")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hours["days"].as_array().unwrap().len(), 7);
    assert_eq!(hours["default_open"], "09:00");

    hours["overrides"] = json!([{
        "date": "2026-12-24",
        "is_open": true,
        "open_time": "10:00",
        "close_time": "14:00",
        "reason": "Nochebuena"
    }]);

    let editor = token("uid-editor", "editor");
    let (status, _) = send(
        &app,
        json_request(Method::PUT, "/api/working-hours", hours.clone(), Some(&editor)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = token("uid-admin", "admin");
    let (status, _) = send(
        &app,
        json_request(Method::PUT, "/api/working-hours", hours, Some(&admin)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, effective) = send(&app, get("/api/working-hours/2026-12-24")).await;
    assert_eq!(effective["is_open"], true);
    assert_eq!(effective["close_time"], "14:00");
    assert_eq!(effective["source"], "override");

    // 2026-12-27 es domingo
    let (_, effective) = send(&app, get("/api/working-hours/2026-12-27")).await;
    assert_eq!(effective["is_open"], false);
    assert_eq!(effective["source"], "weekly");
}

#[tokio::test]
async fn test_working_hours_validation() {
    let app = create_app(AppState::in_memory(config()));
    let admin = token("uid-admin", "admin");

    let (_, mut hours) = send(&app, get("/api/working-hours")).await;
    hours["days"].as_array_mut().unwrap().pop();

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/working-hours", hours, Some(&admin)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_admin_profile_lookup() {
    let now = Utc::now();
    let state = AppState {
        admins: Arc::new(InMemoryAdminRepository::with_admins(vec![Admin {
            id: Uuid::new_v4(),
            auth_uid: "uid-admin".to_string(),
            role: AdminRole::Admin,
            display_name: "Lucía".to_string(),
            created_at: now,
            updated_at: now,
        }])),
        ..AppState::in_memory(config())
    };
    let app = create_app(state);

    let (status, body) = send(&app, authed(Method::GET, "/api/admin/me", &token("uid-admin", "admin"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Lucía");
    assert_eq!(body["role"], "admin");

    let (status, _) = send(&app, authed(Method::GET, "/api/admin/me", &token("uid-ghost", "editor"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, authed(Method::GET, "/api/admin/users", &token("uid-ghost", "editor"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, authed(Method::GET, "/api/admin/users", &token("uid-admin", "admin"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
