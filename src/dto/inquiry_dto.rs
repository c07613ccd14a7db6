use serde::Deserialize;
use validator::Validate;

use crate::models::inquiry::{InquiryInterest, InquiryStatus, NewInquiry};
use crate::utils::validation::validate_not_blank;

// Request del formulario de contacto
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInquiryRequest {
    #[validate(length(min = 1, max = 80), custom = "validate_not_blank")]
    pub first_name: String,

    #[validate(length(min = 1, max = 80), custom = "validate_not_blank")]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 7, max = 30))]
    pub phone: Option<String>,

    pub interest: InquiryInterest,

    #[validate(length(min = 1, max = 5000), custom = "validate_not_blank")]
    pub message: String,

    #[serde(default)]
    pub consent: bool,

    #[validate(length(max = 64))]
    pub vehicle_id: Option<String>,
}

impl From<CreateInquiryRequest> for NewInquiry {
    fn from(request: CreateInquiryRequest) -> Self {
        Self {
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            phone: request.phone,
            interest: request.interest,
            message: request.message,
            consent: request.consent,
            vehicle_id: request.vehicle_id.filter(|id| !id.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInquiryStatusRequest {
    pub status: InquiryStatus,
}

/// Filtros del listado de consultas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InquiryListParams {
    pub status: Option<InquiryStatus>,
}
