//! DTOs del backend de rutas
//!
//! Este módulo contiene las formas de wire de cada endpoint. Cada modo
//! tiene su propia forma de respuesta; la conversión a la forma canónica
//! vive en `services::reconciler`, nunca en el código de render.

pub mod multi_route_dto;
pub mod optimization_dto;
pub mod reference_dto;
pub mod route_dto;
