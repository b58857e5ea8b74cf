//! Modelo de coordenada geográfica
//!
//! Este módulo contiene el punto geográfico básico que usan todas
//! las capas del motor. La construcción valida rangos y finitud.

use serde::{Deserialize, Serialize};

use crate::utils::errors::{ClientResult, EngineError};
use crate::utils::validation::validate_coordinates;

/// Punto geográfico en grados decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Construir un punto validado: lat ∈ [-90, 90], lng ∈ [-180, 180], ambos finitos
    pub fn new(lat: f64, lng: f64) -> ClientResult<Self> {
        validate_coordinates(lat, lng)
            .map_err(|e| EngineError::Validation(format!("invalid coordinate ({}, {}): {}", lat, lng, e.code)))?;
        Ok(Self { lat, lng })
    }

    /// Punto desde el par `[lat, lng]` que usan los payloads del backend
    pub fn from_pair(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[0],
            lng: pair[1],
        }
    }
}
