//! Utilidades geométricas
//!
//! Helpers puramente locales para etiquetado en el mapa: distancia
//! de círculo máximo y búsqueda de la estación más cercana. Nunca se
//! usan para decisiones de coste o factibilidad.

use crate::models::geo::GeoPoint;
use crate::utils::errors::{ClientResult, EngineError};

/// Radio medio de la Tierra en kilómetros
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Algo que tiene una posición en el mapa
pub trait Locatable {
    fn position(&self) -> GeoPoint;
}

impl Locatable for GeoPoint {
    fn position(&self) -> GeoPoint {
        *self
    }
}

/// Distancia Haversine entre dos puntos en kilómetros
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Candidato más cercano a un punto; ante empate gana el primero de la lista
pub fn nearest<'a, T: Locatable>(point: &GeoPoint, candidates: &'a [T]) -> ClientResult<&'a T> {
    let mut best: Option<(&T, f64)> = None;

    for candidate in candidates {
        let distance = haversine_km(point, &candidate.position());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(candidate, _)| candidate)
        .ok_or_else(|| EngineError::EmptyInput("no candidates for nearest lookup".to_string()))
}
