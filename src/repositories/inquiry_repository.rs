use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::inquiry::{Inquiry, InquiryStatus, NewInquiry};
use crate::utils::errors::AppResult;

const INQUIRY_COLUMNS: &str = "id, first_name, last_name, email, phone, interest, message, consent, \
     status, vehicle_id, created_at";

#[async_trait]
pub trait InquiryStore: Send + Sync {
    async fn insert(&self, inquiry: NewInquiry) -> AppResult<Inquiry>;

    /// Más recientes primero, opcionalmente por estado
    async fn list(&self, status: Option<InquiryStatus>) -> AppResult<Vec<Inquiry>>;

    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> AppResult<Option<Inquiry>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

pub struct PgInquiryRepository {
    pool: PgPool,
}

impl PgInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InquiryStore for PgInquiryRepository {
    async fn insert(&self, inquiry: NewInquiry) -> AppResult<Inquiry> {
        let inquiry = sqlx::query_as::<_, Inquiry>(&format!(
            r#"
            INSERT INTO inquiries (first_name, last_name, email, phone, interest, message, consent, status, vehicle_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            INQUIRY_COLUMNS
        ))
        .bind(inquiry.first_name)
        .bind(inquiry.last_name)
        .bind(inquiry.email)
        .bind(inquiry.phone)
        .bind(inquiry.interest.as_str())
        .bind(inquiry.message)
        .bind(inquiry.consent)
        .bind(InquiryStatus::New.as_str())
        .bind(inquiry.vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(inquiry)
    }

    async fn list(&self, status: Option<InquiryStatus>) -> AppResult<Vec<Inquiry>> {
        let inquiries = sqlx::query_as::<_, Inquiry>(&format!(
            "SELECT {} FROM inquiries WHERE ($1::TEXT IS NULL OR status = $1) ORDER BY created_at DESC",
            INQUIRY_COLUMNS
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(inquiries)
    }

    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> AppResult<Option<Inquiry>> {
        let inquiry = sqlx::query_as::<_, Inquiry>(&format!(
            "UPDATE inquiries SET status = $2 WHERE id = $1 RETURNING {}",
            INQUIRY_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(inquiry)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
