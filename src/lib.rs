//! Backend del catálogo del concesionario
//!
//! API HTTP para el catálogo público de vehículos (filtros, orden,
//! paginación y facetas), consultas de contacto, horario de atención y
//! administración básica.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
