//! Modelo canónico de resultado de ruta
//!
//! Este módulo define la forma única a la que se reconcilian las
//! respuestas heterogéneas del backend. Se adjunta a una entrada tras
//! un fetch correcto y se reemplaza entero en cada re-fetch.

use serde::{Deserialize, Serialize};

use crate::models::geo::GeoPoint;

/// Tipo de pausa del conductor según normativa EU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverBreakKind {
    ShortBreak,
    LongRest,
}

impl DriverBreakKind {
    /// Valor textual que emite el backend (`short_break` / `long_rest`)
    pub fn parse(value: &str) -> Self {
        match value {
            "long_rest" => Self::LongRest,
            _ => Self::ShortBreak,
        }
    }
}

/// Pausa del conductor sobre la ruta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverBreak {
    pub kind: DriverBreakKind,
    pub location: GeoPoint,
    pub start_minutes: f64,
    pub duration_minutes: f64,
}

/// Parada de carga reconciliada; solo estaciones con coordenadas conocidas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingStop {
    pub station_id: Option<i64>,
    pub station_name: Option<String>,
    pub position: GeoPoint,
    pub price_per_kwh: Option<f64>,
    pub charging_time_minutes: Option<f64>,
    pub charging_cost_eur: Option<f64>,
}

/// Intercambio de conductores en una estación compartida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapEvent {
    pub station_id: i64,
    pub location: GeoPoint,
    pub driver_a: String,
    pub driver_b: String,
    pub benefit_km: f64,
    pub reason: String,
    pub route_index: Option<usize>,
}

/// Tramo de ruta canónico
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub energy_kwh: Option<f64>,
    /// Polilínea detallada del tramo; puede estar vacía según el backend
    pub coordinates: Vec<GeoPoint>,
    pub driver_id: Option<String>,
}

/// Desglose de costes en euros
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub driver_eur: f64,
    pub energy_eur: f64,
    pub depreciation_eur: f64,
    pub tolls_eur: f64,
    pub charging_eur: f64,
    pub total_eur: f64,
}

/// Resultado canónico de una ruta calculada por el backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Polilínea completa de la ruta, concatenada en orden de tramo
    pub path: Vec<GeoPoint>,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub segments: Vec<RouteSegment>,
    pub charging_stops: Vec<ChargingStop>,
    pub driver_breaks: Vec<DriverBreak>,
    pub swap_events: Vec<SwapEvent>,
    pub costs: CostBreakdown,
    /// Payload original del backend, conservado para depuración
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_kind_parse() {
        assert_eq!(DriverBreakKind::parse("short_break"), DriverBreakKind::ShortBreak);
        assert_eq!(DriverBreakKind::parse("long_rest"), DriverBreakKind::LongRest);
        // Valores desconocidos caen al tipo corto
        assert_eq!(DriverBreakKind::parse("coffee"), DriverBreakKind::ShortBreak);
    }
}
