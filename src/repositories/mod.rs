//! Repositorios
//!
//! Frontera de almacenamiento: un trait por colección, con implementación
//! Postgres y en memoria.

pub mod admin_repository;
pub mod inquiry_repository;
pub mod memory;
pub mod vehicle_repository;
pub mod working_hours_repository;

pub use admin_repository::AdminStore;
pub use inquiry_repository::InquiryStore;
pub use vehicle_repository::VehicleStore;
pub use working_hours_repository::WorkingHoursStore;
