use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::working_hours::WorkingHours;
use crate::utils::errors::AppResult;

/// Registro único de horario
#[async_trait]
pub trait WorkingHoursStore: Send + Sync {
    /// `None` mientras nunca se haya guardado
    async fn get(&self) -> AppResult<Option<WorkingHours>>;

    async fn save(&self, hours: &WorkingHours) -> AppResult<WorkingHours>;
}

pub struct PgWorkingHoursRepository {
    pool: PgPool,
}

impl PgWorkingHoursRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkingHoursStore for PgWorkingHoursRepository {
    async fn get(&self) -> AppResult<Option<WorkingHours>> {
        let row = sqlx::query_scalar::<_, Json<WorkingHours>>("SELECT data FROM working_hours WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|Json(hours)| hours))
    }

    async fn save(&self, hours: &WorkingHours) -> AppResult<WorkingHours> {
        let Json(saved) = sqlx::query_scalar::<_, Json<WorkingHours>>(
            r#"
            INSERT INTO working_hours (id, data, updated_at)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            RETURNING data
            "#,
        )
        .bind(Json(hours))
        .bind(hours.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}
