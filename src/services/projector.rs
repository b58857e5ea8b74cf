//! Proyección de vista de mapa
//!
//! Este módulo calcula la región que encuadra la unión de puntos de
//! todas las capas, para el ajuste de cámara del mapa.

use crate::models::geo::GeoPoint;
use crate::models::layer::RouteLayer;

/// Margen relativo sobre el span de los puntos
const PAD_RATIO: f64 = 0.05;
/// Margen mínimo en grados, para que un punto único tenga área visible
const MIN_PAD_DEG: f64 = 0.01;

/// Región rectangular de encuadre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl MapBounds {
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.south_west.lat + self.north_east.lat) / 2.0,
            lng: (self.south_west.lng + self.north_east.lng) / 2.0,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// Región que encuadra todas las capas; `None` si no hay ninguna capa
pub fn fit_bounds(layers: &[RouteLayer]) -> Option<MapBounds> {
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    let mut min_lng = f64::INFINITY;
    let mut max_lng = f64::NEG_INFINITY;
    let mut seen = false;

    for layer in layers {
        for point in layer_points(layer) {
            seen = true;
            min_lat = min_lat.min(point.lat);
            max_lat = max_lat.max(point.lat);
            min_lng = min_lng.min(point.lng);
            max_lng = max_lng.max(point.lng);
        }
    }

    if !seen {
        return None;
    }

    let pad_lat = ((max_lat - min_lat) * PAD_RATIO).max(MIN_PAD_DEG);
    let pad_lng = ((max_lng - min_lng) * PAD_RATIO).max(MIN_PAD_DEG);

    Some(MapBounds {
        south_west: GeoPoint {
            lat: (min_lat - pad_lat).max(-90.0),
            lng: (min_lng - pad_lng).max(-180.0),
        },
        north_east: GeoPoint {
            lat: (max_lat + pad_lat).min(90.0),
            lng: (max_lng + pad_lng).min(180.0),
        },
    })
}

/// Todos los puntos dibujables de una capa
fn layer_points(layer: &RouteLayer) -> impl Iterator<Item = GeoPoint> + '_ {
    layer
        .line
        .iter()
        .copied()
        .chain(layer.charging_stops.iter().map(|stop| stop.position))
        .chain(layer.driver_breaks.iter().map(|brk| brk.location))
        .chain(layer.swap_events.iter().map(|swap| swap.location))
        .chain(layer.swap_point)
        .chain([layer.start_point, layer.end_point])
}
