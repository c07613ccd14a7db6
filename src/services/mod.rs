//! Servicios de negocio
//!
//! Lógica del catálogo (consulta compuesta, conteo total, accesores por id)
//! y del conteo de facetas.

pub mod catalog_service;
pub mod facet_service;

pub use catalog_service::CatalogService;
pub use facet_service::FacetService;
