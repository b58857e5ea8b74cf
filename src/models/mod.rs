//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del motor: geometría,
//! entradas de ruta, el resultado canónico y el view-model de capas.

pub mod geo;
pub mod layer;
pub mod route_entry;
pub mod route_result;
