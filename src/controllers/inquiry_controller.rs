use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::inquiry_dto::{CreateInquiryRequest, InquiryListParams, UpdateInquiryStatusRequest};
use crate::models::inquiry::Inquiry;
use crate::repositories::InquiryStore;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct InquiryController {
    store: Arc<dyn InquiryStore>,
}

impl InquiryController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.inquiries.clone(),
        }
    }

    pub async fn create(
        &self,
        request: CreateInquiryRequest,
    ) -> Result<ApiResponse<Inquiry>, AppError> {
        request.validate()?;

        let inquiry = self.store.insert(request.into()).await.map_err(|e| {
            error!("❌ Error guardando consulta: {}", e);
            e
        })?;
        info!(
            "📨 Nueva consulta {} ({})",
            inquiry.id,
            inquiry.interest.as_str()
        );

        Ok(ApiResponse::success_with_message(
            inquiry,
            "Consulta enviada exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, params: InquiryListParams) -> Result<Vec<Inquiry>, AppError> {
        self.store.list(params.status).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateInquiryStatusRequest,
    ) -> Result<ApiResponse<Inquiry>, AppError> {
        let inquiry = self
            .store
            .update_status(id, request.status)
            .await?
            .ok_or_else(|| not_found_error("Consulta", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            inquiry,
            format!("Estado actualizado a '{}'", request.status),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(not_found_error("Consulta", &id.to_string()));
        }
        Ok(())
    }
}
