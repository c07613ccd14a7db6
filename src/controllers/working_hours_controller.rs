use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::dto::api_response::ApiResponse;
use crate::models::working_hours::{EffectiveHours, WorkingHours};
use crate::repositories::WorkingHoursStore;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_working_hours;

pub struct WorkingHoursController {
    store: Arc<dyn WorkingHoursStore>,
}

impl WorkingHoursController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.working_hours.clone(),
        }
    }

    /// Horario guardado, o el horario por defecto si nunca se configuró
    pub async fn get(&self) -> Result<WorkingHours, AppError> {
        Ok(self.store.get().await?.unwrap_or_default())
    }

    pub async fn replace(
        &self,
        mut hours: WorkingHours,
    ) -> Result<ApiResponse<WorkingHours>, AppError> {
        validate_working_hours(&hours)?;

        hours.days.sort_by_key(|d| d.day_of_week);
        hours.overrides.sort_by_key(|o| o.date);
        hours.updated_at = Utc::now();

        let saved = self.store.save(&hours).await?;
        info!("🕘 Horario actualizado ({} excepciones)", saved.overrides.len());

        Ok(ApiResponse::success_with_message(
            saved,
            "Horario actualizado exitosamente".to_string(),
        ))
    }

    pub async fn for_date(&self, date: NaiveDate) -> Result<EffectiveHours, AppError> {
        Ok(self.get().await?.hours_for_date(date))
    }
}
