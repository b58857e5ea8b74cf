//! View-model de capas de mapa
//!
//! Este módulo define la proyección renderizable de una entrada más su
//! último resultado. Las capas son snapshots: no guardan referencias al
//! store y se recalculan en cada render.

use serde::{Deserialize, Serialize};

use crate::models::geo::GeoPoint;
use crate::models::route_result::{ChargingStop, DriverBreak, SwapEvent};
use crate::state::FetchState;

/// Modo de presentación de la capa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerMode {
    /// Ruta calculada sin optimización cruzada; los overlays son informativos
    Simulation,
    /// Ruta salida del optimizador por lotes; los overlays son plan autoritativo
    Optimization,
}

/// Capa de mapa para una entrada en un modo concreto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLayer {
    pub id: String,
    pub color: String,
    pub line: Vec<GeoPoint>,
    pub charging_stops: Vec<ChargingStop>,
    pub driver_breaks: Vec<DriverBreak>,
    pub swap_events: Vec<SwapEvent>,
    /// Marcador singular de intercambio; cosmético cuando no hay swaps reales
    pub swap_point: Option<GeoPoint>,
    pub start_point: GeoPoint,
    pub end_point: GeoPoint,
    pub highlighted: bool,
    pub mode: LayerMode,
}

/// Registro de la lista resumen, ordenada por coste
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: String,
    pub name: String,
    pub truck_key: String,
    pub fetch: FetchState,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub total_cost_eur: Option<f64>,
    pub charging_stops: usize,
    pub driver_breaks: usize,
    pub swap_events: usize,
    /// Motivo del último fallo, para el badge de error de la fila
    pub error: Option<String>,
}
