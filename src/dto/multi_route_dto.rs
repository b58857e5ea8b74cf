//! DTOs para el endpoint de simulación por lotes
//!
//! Este módulo define las estructuras para `POST /multi-route`. La
//! respuesta usa unidades crudas (metros y segundos) y se alinea
//! posicionalmente con el array del request.

use serde::{Deserialize, Serialize};

use crate::dto::route_dto::{ChargingStationRefDto, CoordinateDto, DriverBreakDto};

/// Ruta individual dentro del request por lotes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiRouteLegDto {
    pub start_point: [f64; 2], // [latitude, longitude]
    pub end_point: [f64; 2],
    pub truck_type: String,
}

/// Request de /multi-route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiRouteRequest {
    pub routes: Vec<MultiRouteLegDto>,
}

/// Tramo en la forma simplificada del simulador
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimRouteSegmentDto {
    pub start_point: [f64; 2],
    pub end_point: [f64; 2],
    #[serde(default)]
    pub distance: f64, // metros
    #[serde(default)]
    pub duration: f64, // segundos
    #[serde(default)]
    pub energy_consumption: f64, // kWh
}

/// Parada de carga en la forma del simulador
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimChargingStopDto {
    pub charging_station: ChargingStationRefDto,
    #[serde(default)]
    pub arrival_battery_level: f64,
    #[serde(default)]
    pub departure_battery_level: f64,
    #[serde(default)]
    pub charging_time: f64,
    #[serde(default)]
    pub charging_cost: f64,
}

/// Desglose de costes del simulador
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimCostBreakdownDto {
    #[serde(default)]
    pub driver_cost: f64,
    #[serde(default)]
    pub charging_cost: f64,
}

/// Resultado individual dentro de la respuesta por lotes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiRouteResultDto {
    #[serde(default)]
    pub total_distance: f64, // metros
    #[serde(default)]
    pub total_duration: f64, // segundos, incluye pausas y cargas
    #[serde(default)]
    pub driving_duration: f64, // segundos de conducción
    #[serde(default)]
    pub total_energy_consumption: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub cost_breakdown: Option<SimCostBreakdownDto>,
    #[serde(default)]
    pub route_segments: Vec<SimRouteSegmentDto>,
    #[serde(default)]
    pub coordinates: Vec<CoordinateDto>,
    #[serde(default)]
    pub charging_stops: Vec<SimChargingStopDto>,
    #[serde(default)]
    pub nearby_charging_stations: Vec<ChargingStationRefDto>,
    #[serde(default)]
    pub driver_breaks: Vec<DriverBreakDto>,
    #[serde(default)]
    pub feasible: bool,
}

/// Respuesta de /multi-route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiRouteResponse {
    #[serde(default)]
    pub routes: Vec<MultiRouteResultDto>,
    #[serde(default)]
    pub total_distance: f64, // metros
    #[serde(default)]
    pub total_duration: f64, // segundos
    #[serde(default)]
    pub total_cost: f64,
}
