//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y geometría local de apoyo al renderizado.

pub mod errors;
pub mod geo;
pub mod validation;
