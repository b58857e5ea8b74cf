//! DTOs para los endpoints de ruta individual
//!
//! Este módulo define las estructuras de datos para interactuar con
//! `POST /route` y `POST /calculate-costs` del backend de rutas.

use serde::{Deserialize, Serialize};

/// Request por ruta para /route, /calculate-costs y /optimize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRouteRequest {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub route_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_salary: Option<f64>,
}

/// Punto de la polilínea en la respuesta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinateDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Tramo detallado de la respuesta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSegmentDto {
    #[serde(default)]
    pub segment_number: Option<u32>,
    pub start_point: [f64; 2], // [latitude, longitude]
    pub end_point: [f64; 2],
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub duration_minutes: f64,
    #[serde(default)]
    pub energy_consumption_kwh: Option<f64>,
    #[serde(default)]
    pub coordinates: Vec<CoordinateDto>,
    #[serde(default)]
    pub driver_id: Option<String>,
}

/// Estación embebida en una parada de carga; las coordenadas pueden faltar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChargingStationRefDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub operator_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, rename = "price_per_kWh")]
    pub price_per_kwh: Option<f64>,
}

/// Parada de carga detallada (forma de /calculate-costs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingStopDto {
    #[serde(default)]
    pub stop_number: Option<u32>,
    pub charging_station: ChargingStationRefDto,
    #[serde(default)]
    pub arrival_battery_kwh: Option<f64>,
    #[serde(default)]
    pub departure_battery_kwh: Option<f64>,
    #[serde(default)]
    pub energy_to_charge_kwh: Option<f64>,
    #[serde(default)]
    pub charging_time_hours: Option<f64>,
    #[serde(default)]
    pub charging_cost_eur: Option<f64>,
}

/// Pausa de conductor en la respuesta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverBreakDto {
    pub break_type: String, // "short_break" | "long_rest"
    pub location: [f64; 2],
    #[serde(default)]
    pub start_time: f64, // segundos desde la salida
    #[serde(default)]
    pub duration: f64, // segundos
}

/// Desglose de costes en la respuesta
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteCostsDto {
    #[serde(default)]
    pub driver_cost_eur: f64,
    #[serde(default)]
    pub energy_cost_eur: Option<f64>,
    #[serde(default)]
    pub depreciation_cost_eur: f64,
    #[serde(default)]
    pub tolls_cost_eur: f64,
    #[serde(default)]
    pub charging_cost_eur: f64,
    #[serde(default)]
    pub total_cost_eur: f64,
}

/// Conductor asignado por el backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedDriverDto {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Respuesta de /route y /calculate-costs; también cada elemento de
/// `routes` en la respuesta de /optimize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRouteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub duration_minutes: f64,
    #[serde(default)]
    pub coordinates: Vec<CoordinateDto>,
    #[serde(default)]
    pub route_segments: Vec<RouteSegmentDto>,
    #[serde(default)]
    pub charging_stops: Vec<ChargingStopDto>,
    #[serde(default)]
    pub driver_breaks: Vec<DriverBreakDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_costs: Option<RouteCostsDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<AssignedDriverDto>,
}
