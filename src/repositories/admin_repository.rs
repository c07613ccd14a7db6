use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::admin::Admin;
use crate::utils::errors::AppResult;

const ADMIN_COLUMNS: &str = "id, auth_uid, role, display_name, created_at, updated_at";

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_auth_uid(&self, auth_uid: &str) -> AppResult<Option<Admin>>;

    async fn list(&self) -> AppResult<Vec<Admin>>;
}

pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for PgAdminRepository {
    async fn find_by_auth_uid(&self, auth_uid: &str) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE auth_uid = $1",
            ADMIN_COLUMNS
        ))
        .bind(auth_uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    async fn list(&self) -> AppResult<Vec<Admin>> {
        let admins = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins ORDER BY display_name ASC",
            ADMIN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(admins)
    }
}
