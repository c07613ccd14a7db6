use std::sync::Arc;

use crate::models::admin::Admin;
use crate::repositories::AdminStore;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct AdminController {
    store: Arc<dyn AdminStore>,
}

impl AdminController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.admins.clone(),
        }
    }

    pub async fn me(&self, auth_uid: &str) -> Result<Admin, AppError> {
        self.store
            .find_by_auth_uid(auth_uid)
            .await?
            .ok_or_else(|| not_found_error("Administrador", auth_uid))
    }

    pub async fn list(&self) -> Result<Vec<Admin>, AppError> {
        self.store.list().await
    }
}
