//! Datos de referencia del backend
//!
//! Camiones, conductores y estaciones de carga se consultan al margen
//! de la orquestación de rutas.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::RoutingBackend;
use crate::dto::reference_dto::{ChargingStationDto, DriverDto, TruckSpecDto};
use crate::utils::errors::ClientResult;

pub struct ReferenceDataService {
    backend: Arc<dyn RoutingBackend>,
}

impl ReferenceDataService {
    pub fn new(backend: Arc<dyn RoutingBackend>) -> Self {
        Self { backend }
    }

    /// Catálogo de camiones disponibles, por clave de modelo
    pub async fn trucks(&self) -> ClientResult<HashMap<String, TruckSpecDto>> {
        let trucks = self.backend.trucks().await?;
        log::info!("🚛 Loaded {} truck models", trucks.len());
        Ok(trucks)
    }

    /// Conductores de la flota, por id
    pub async fn drivers(&self) -> ClientResult<HashMap<String, DriverDto>> {
        let drivers = self.backend.drivers().await?;
        log::info!("👥 Loaded {} drivers", drivers.len());
        Ok(drivers)
    }

    /// Catálogo completo de estaciones de carga (limit = -1)
    pub async fn charging_stations(&self) -> ClientResult<Vec<ChargingStationDto>> {
        let stations = self.backend.charging_stations(-1).await?;
        log::info!("🔋 Loaded {} charging stations", stations.len());
        Ok(stations)
    }
}

/// Filtrar estaciones aptas para camiones
pub fn truck_suitable(stations: &[ChargingStationDto]) -> Vec<&ChargingStationDto> {
    stations
        .iter()
        .filter(|station| station.truck_suitability == "yes")
        .collect()
}
