//! Cliente HTTP del backend de rutas
//!
//! Este módulo define el trait de acceso al backend y su implementación
//! reqwest. El trait es la costura de test: el orquestador no conoce la
//! red, solo este contrato.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::environment::EnvironmentConfig;
use crate::dto::multi_route_dto::{MultiRouteRequest, MultiRouteResponse};
use crate::dto::optimization_dto::OptimizeResponse;
use crate::dto::reference_dto::{ChargingStationDto, DriverDto, TruckSpecDto};
use crate::dto::route_dto::{CostRouteRequest, CostRouteResponse};
use crate::utils::errors::{ClientResult, EngineError};

/// Contrato con el backend de cálculo de rutas y costes
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    /// POST /calculate-costs para una sola ruta
    async fn calculate_costs(&self, request: &CostRouteRequest) -> ClientResult<CostRouteResponse>;

    /// POST /optimize con todas las rutas del lote
    async fn optimize_routes(&self, requests: &[CostRouteRequest]) -> ClientResult<OptimizeResponse>;

    /// POST /multi-route con todas las rutas del lote
    async fn multi_route(&self, request: &MultiRouteRequest) -> ClientResult<MultiRouteResponse>;

    /// GET /trucks
    async fn trucks(&self) -> ClientResult<HashMap<String, TruckSpecDto>>;

    /// GET /drivers
    async fn drivers(&self) -> ClientResult<HashMap<String, DriverDto>>;

    /// GET /charging-stations; limit = -1 pide el catálogo completo
    async fn charging_stations(&self, limit: i64) -> ClientResult<Vec<ChargingStationDto>>;
}

/// Implementación reqwest contra el backend real
pub struct HttpBackendClient {
    config: EnvironmentConfig,
    client: Client,
}

impl HttpBackendClient {
    pub fn new(config: EnvironmentConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.config.endpoint(path);
        log::debug!("📤 POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        self.read_response(path, response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.config.endpoint(path);
        log::debug!("📤 GET {}", url);

        let response = self.client.get(&url).send().await?;
        self.read_response(path, response).await
    }

    async fn read_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;
        log::debug!("📡 {} -> {}", path, status);

        if !status.is_success() {
            log::warn!("❌ {} failed with status {}: {}", path, status, text);
            return Err(EngineError::Backend(format!("{} {}: {}", path, status, text)));
        }

        serde_json::from_str(&text)
            .map_err(|e| EngineError::Backend(format!("invalid response from {}: {}", path, e)))
    }
}

#[async_trait]
impl RoutingBackend for HttpBackendClient {
    async fn calculate_costs(&self, request: &CostRouteRequest) -> ClientResult<CostRouteResponse> {
        self.post_json("/calculate-costs", request).await
    }

    async fn optimize_routes(
        &self,
        requests: &[CostRouteRequest],
    ) -> ClientResult<OptimizeResponse> {
        self.post_json("/optimize", requests).await
    }

    async fn multi_route(&self, request: &MultiRouteRequest) -> ClientResult<MultiRouteResponse> {
        self.post_json("/multi-route", request).await
    }

    async fn trucks(&self) -> ClientResult<HashMap<String, TruckSpecDto>> {
        self.get_json("/trucks").await
    }

    async fn drivers(&self) -> ClientResult<HashMap<String, DriverDto>> {
        self.get_json("/drivers").await
    }

    async fn charging_stations(&self, limit: i64) -> ClientResult<Vec<ChargingStationDto>> {
        self.get_json(&format!("/charging-stations?limit={}", limit))
            .await
    }
}
