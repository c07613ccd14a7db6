//! DTOs de la API
//!
//! Requests validados y responses serializados de cada recurso.

pub mod api_response;
pub mod inquiry_dto;
pub mod vehicle_dto;
