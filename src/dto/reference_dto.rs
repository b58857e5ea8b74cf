//! DTOs de datos de referencia
//!
//! Este módulo define las formas de `GET /trucks`, `GET /drivers` y
//! `GET /charging-stations`, que se consultan al margen de la
//! orquestación de rutas.

use serde::{Deserialize, Serialize};

use crate::models::geo::GeoPoint;
use crate::utils::geo::Locatable;

/// Especificación de camión (`GET /trucks` devuelve un mapa por modelo)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckSpecDto {
    pub manufacturer: String,
    pub model: String,
    pub battery_capacity: f64, // kWh
    pub consumption: f64,      // kWh/km
    pub range: f64,            // km
}

/// Conductor de la flota (`GET /drivers` devuelve un mapa id → driver)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverDto {
    pub id: String,
    pub name: String,
}

/// Estación de carga pública (`GET /charging-stations`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingStationDto {
    pub id: i64,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub truck_suitability: String, // "yes" | "limited"
    pub operator_name: String,
    #[serde(rename = "max_power_kW")]
    pub max_power_kw: f64,
    #[serde(rename = "price_per_kWh")]
    pub price_per_kwh: f64,
}

impl Locatable for ChargingStationDto {
    fn position(&self) -> GeoPoint {
        GeoPoint {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}
