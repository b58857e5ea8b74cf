//! DTOs para los endpoints de optimización por lotes
//!
//! Este módulo define las estructuras para `POST /compare-costs` y
//! `POST /optimize`: el body es el array de requests por ruta y la
//! respuesta llega con swaps, comparativas y ahorros agregados.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dto::route_dto::CostRouteResponse;

/// Intercambio de camiones propuesto por el optimizador
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckSwapDto {
    pub station_id: i64,
    pub station_location: [f64; 2], // [latitude, longitude]
    pub driver1_id: String,
    pub driver2_id: String,
    #[serde(default)]
    pub benefit_km: f64,
    #[serde(default)]
    pub alignment_dot: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub detour_km_total: f64,
    #[serde(default)]
    pub iteration: Option<i64>,
    #[serde(default)]
    pub route_idx: Option<usize>,
    #[serde(default)]
    pub global_iteration: Option<i64>,
}

/// Comparativa base/optimizado por ruta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteComparisonDto {
    pub route_name: String,
    pub route_index: usize,
    #[serde(default)]
    pub base: HashMap<String, f64>,
    #[serde(default)]
    pub optimized: HashMap<String, f64>,
    #[serde(default)]
    pub savings: HashMap<String, f64>,
    #[serde(default)]
    pub savings_percentage: HashMap<String, f64>,
    #[serde(default)]
    pub swaps_applied: Vec<TruckSwapDto>,
}

/// Respuesta de /compare-costs y /optimize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rutas optimizadas, alineadas posicionalmente con el request
    #[serde(default)]
    pub routes: Vec<CostRouteResponse>,
    #[serde(default)]
    pub truck_swaps: Vec<TruckSwapDto>,
    #[serde(default)]
    pub route_comparisons: Vec<RouteComparisonDto>,
    #[serde(default)]
    pub total_distance_km: f64,
    #[serde(default)]
    pub total_duration_minutes: f64,
    #[serde(default)]
    pub total_cost_eur: f64,
    #[serde(default)]
    pub total_charging_cost_eur: f64,
    #[serde(default)]
    pub base_cost_eur: f64,
    #[serde(default)]
    pub optimized_cost_eur: f64,
    #[serde(default)]
    pub cost_savings_eur: f64,
    #[serde(default)]
    pub cost_savings_percentage: f64,
}
