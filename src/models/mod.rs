//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL de `migrations/`.

pub mod admin;
pub mod catalog;
pub mod inquiry;
pub mod vehicle;
pub mod working_hours;
