use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::catalog::{FieldValue, VehicleQuery};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::AppResult;

const VEHICLE_COLUMNS: &str = "id, make, model, year, price, mileage, fuel_type, transmission, \
     drivetrain, badge, title, image_url, description, vin, stock_number, available, features, \
     created_at, updated_at";

/// Colección de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Ejecutar una consulta compuesta (predicados, orden, límite, offset)
    async fn query(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>>;

    /// Conteo agregado de toda la colección
    async fn count_all(&self) -> AppResult<i64>;

    /// Lectura completa de la colección
    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Insertar; el id lo asigna el almacenamiento
    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    /// Guardar el vehículo completo; `None` si el id no existe
    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>>;

    /// `false` si el id no existe
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Text(text) => builder.push_bind(text.clone()),
        FieldValue::Integer(number) => builder.push_bind(*number),
        FieldValue::Decimal(decimal) => builder.push_bind(*decimal),
        FieldValue::Timestamp(timestamp) => builder.push_bind(*timestamp),
    };
}

/// Traducir la consulta a SQL parametrizado
fn build_select(query: &VehicleQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM vehicles WHERE TRUE", VEHICLE_COLUMNS));

    for predicate in &query.predicates {
        builder.push(format!(" AND {} {} ", predicate.field().column(), predicate.operator()));
        push_value(&mut builder, predicate.value());
    }

    builder.push(format!(
        " ORDER BY {} {}, id ASC",
        query.sort.field.column(),
        query.sort.direction.keyword()
    ));
    builder.push(" LIMIT ").push_bind(query.limit);
    builder.push(" OFFSET ").push_bind(query.offset);

    builder
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn query(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let mut builder = build_select(query);
        let vehicles = builder
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn count_all(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!("SELECT {} FROM vehicles", VEHICLE_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (make, model, year, price, mileage, fuel_type, transmission, drivetrain,
                                  badge, title, image_url, description, vin, stock_number, available, features)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.make)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.price)
        .bind(vehicle.mileage)
        .bind(vehicle.fuel_type)
        .bind(vehicle.transmission)
        .bind(vehicle.drivetrain)
        .bind(vehicle.badge)
        .bind(vehicle.title)
        .bind(vehicle.image_url)
        .bind(vehicle.description)
        .bind(vehicle.vin)
        .bind(vehicle.stock_number)
        .bind(vehicle.available)
        .bind(vehicle.features)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let updated = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET make = $2, model = $3, year = $4, price = $5, mileage = $6, fuel_type = $7,
                transmission = $8, drivetrain = $9, badge = $10, title = $11, image_url = $12,
                description = $13, vin = $14, stock_number = $15, available = $16, features = $17,
                updated_at = $18
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.price)
        .bind(vehicle.mileage)
        .bind(&vehicle.fuel_type)
        .bind(&vehicle.transmission)
        .bind(&vehicle.drivetrain)
        .bind(&vehicle.badge)
        .bind(&vehicle.title)
        .bind(&vehicle.image_url)
        .bind(&vehicle.description)
        .bind(&vehicle.vin)
        .bind(&vehicle.stock_number)
        .bind(vehicle.available)
        .bind(&vehicle.features)
        .bind(vehicle.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
