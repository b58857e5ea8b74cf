//! Orquestación de peticiones al backend
//!
//! Este módulo emite las peticiones por modo y gestiona el estado de
//! fetch por entrada. Los fallos por entrada quedan aislados; los
//! fallos de lote tumban el lote entero.
//!
//! La serialización de llamadas del mismo modo es responsabilidad del
//! caller (flag de ocupado en la UI); el motor no implementa
//! cancelación: un lote en vuelo corre hasta completarse.

use std::sync::Arc;

use crate::clients::RoutingBackend;
use crate::dto::multi_route_dto::{MultiRouteLegDto, MultiRouteRequest};
use crate::dto::optimization_dto::RouteComparisonDto;
use crate::dto::route_dto::CostRouteRequest;
use crate::models::route_entry::RouteEntry;
use crate::models::route_result::{RouteResult, SwapEvent};
use crate::services::reconciler;
use crate::state::{FetchState, RouteEntryStore};
use crate::utils::errors::{ClientResult, EngineError};

/// Política de alineación posicional request/response en lotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentPolicy {
    /// Tolera respuestas más cortas que el request: las entradas de cola
    /// quedan sin resultado (comportamiento de referencia)
    #[default]
    Lenient,
    /// Cualquier desajuste de longitud falla el lote entero
    Strict,
}

/// Desenlace por entrada de una pasada secuencial
#[derive(Debug)]
pub struct SingleRouteOutcome {
    pub entry_id: String,
    pub result: ClientResult<RouteResult>,
}

/// Resumen agregado de una optimización por lotes
#[derive(Debug, Clone)]
pub struct BatchOptimizationSummary {
    pub swaps: Vec<SwapEvent>,
    pub base_cost_eur: f64,
    pub optimized_cost_eur: f64,
    pub cost_savings_eur: f64,
    pub cost_savings_percentage: f64,
    pub comparisons: Vec<RouteComparisonDto>,
}

/// Resumen agregado de una simulación por lotes
#[derive(Debug, Clone)]
pub struct BatchSimulationSummary {
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub total_cost_eur: f64,
    pub matched: usize,
    /// Ids que quedaron sin resultado por una respuesta corta (Lenient)
    pub unmatched: Vec<String>,
}

pub struct RequestOrchestrator {
    backend: Arc<dyn RoutingBackend>,
    alignment: AlignmentPolicy,
}

impl RequestOrchestrator {
    pub fn new(backend: Arc<dyn RoutingBackend>) -> Self {
        Self {
            backend,
            alignment: AlignmentPolicy::default(),
        }
    }

    pub fn with_alignment(backend: Arc<dyn RoutingBackend>, alignment: AlignmentPolicy) -> Self {
        Self { backend, alignment }
    }

    /// Una petición a /calculate-costs por entrada, estrictamente
    /// secuencial: la petición i+1 no sale hasta que la i termina. Un
    /// fallo se registra en esa entrada y no aborta el resto.
    pub async fn fetch_single_routes(
        &self,
        store: &mut RouteEntryStore,
    ) -> Vec<SingleRouteOutcome> {
        let requests: Vec<(String, CostRouteRequest)> = store
            .entries()
            .map(|entry| (entry.id.clone(), cost_request(entry)))
            .collect();

        let mut outcomes = Vec::with_capacity(requests.len());

        for (id, request) in requests {
            store.mark_pending(&id);
            log::info!("🚚 Requesting costs for route '{}'", request.route_name);

            let result = match self.backend.calculate_costs(&request).await {
                Ok(response) if response.success => {
                    let route_result = reconciler::route_result_from_single(&response);
                    store.apply_success(&id, route_result.clone());
                    Ok(route_result)
                }
                Ok(response) => {
                    let reason = response
                        .message
                        .unwrap_or_else(|| "backend reported failure".to_string());
                    log::warn!("❌ Route '{}' failed: {}", request.route_name, reason);
                    store.apply_failure(&id, reason.clone());
                    Err(EngineError::Backend(reason))
                }
                Err(e) => {
                    log::warn!("❌ Route '{}' failed: {}", request.route_name, e);
                    store.apply_failure(&id, e.to_string());
                    Err(e)
                }
            };

            outcomes.push(SingleRouteOutcome {
                entry_id: id,
                result,
            });
        }

        outcomes
    }

    /// Una única petición a /optimize con todo el lote. Todo o nada: un
    /// fallo HTTP o de cuerpo falla el lote entero, porque los swaps son
    /// decisiones cruzadas entre rutas.
    pub async fn fetch_batch_optimization(
        &self,
        store: &mut RouteEntryStore,
    ) -> ClientResult<BatchOptimizationSummary> {
        let ids = store.ids();
        if ids.is_empty() {
            return Err(EngineError::Validation(
                "no route entries to optimize".to_string(),
            ));
        }

        let requests: Vec<CostRouteRequest> = store.entries().map(cost_request).collect();
        let prior = snapshot_fetch_states(store, &ids);
        for id in &ids {
            store.mark_pending(id);
        }

        log::info!("🧮 Optimizing batch of {} routes", ids.len());

        let response = match self.backend.optimize_routes(&requests).await {
            Ok(response) => response,
            Err(e) => return Err(fail_batch(store, &ids, e)),
        };

        if !response.success {
            let reason = response
                .message
                .clone()
                .unwrap_or_else(|| "optimizer reported failure".to_string());
            return Err(fail_batch(store, &ids, EngineError::Backend(reason)));
        }

        let matched = self.align(store, &ids, &prior, response.routes.len())?;
        for (index, id) in ids.iter().take(matched).enumerate() {
            let result = reconciler::route_result_from_optimized(
                &response.routes[index],
                &response.truck_swaps,
                index,
            );
            store.apply_success(id, result);
        }

        log::info!(
            "✅ Optimization done: {} swaps, {:.2} EUR saved ({:.1}%)",
            response.truck_swaps.len(),
            response.cost_savings_eur,
            response.cost_savings_percentage
        );

        Ok(BatchOptimizationSummary {
            swaps: response
                .truck_swaps
                .iter()
                .map(reconciler::swap_event_from_dto)
                .collect(),
            base_cost_eur: response.base_cost_eur,
            optimized_cost_eur: response.optimized_cost_eur,
            cost_savings_eur: response.cost_savings_eur,
            cost_savings_percentage: response.cost_savings_percentage,
            comparisons: response.route_comparisons,
        })
    }

    /// Una única petición a /multi-route con todo el lote; la respuesta
    /// se demultiplexa por posición sobre los ids del request.
    pub async fn fetch_batch_simulation(
        &self,
        store: &mut RouteEntryStore,
    ) -> ClientResult<BatchSimulationSummary> {
        let ids = store.ids();
        if ids.is_empty() {
            return Err(EngineError::Validation(
                "no route entries to simulate".to_string(),
            ));
        }

        let request = MultiRouteRequest {
            routes: store
                .entries()
                .map(|entry| MultiRouteLegDto {
                    start_point: [entry.start.lat, entry.start.lng],
                    end_point: [entry.end.lat, entry.end.lng],
                    truck_type: entry.truck_key.clone(),
                })
                .collect(),
        };
        let prior = snapshot_fetch_states(store, &ids);
        for id in &ids {
            store.mark_pending(id);
        }

        log::info!("🛰️ Simulating batch of {} routes", ids.len());

        let response = match self.backend.multi_route(&request).await {
            Ok(response) => response,
            Err(e) => return Err(fail_batch(store, &ids, e)),
        };

        let matched = self.align(store, &ids, &prior, response.routes.len())?;
        for (index, id) in ids.iter().take(matched).enumerate() {
            let result = reconciler::route_result_from_simulation(&response.routes[index]);
            store.apply_success(id, result);
        }

        Ok(BatchSimulationSummary {
            total_distance_km: response.total_distance / 1000.0,
            total_duration_minutes: response.total_duration / 60.0,
            total_cost_eur: response.total_cost,
            matched,
            unmatched: ids.iter().skip(matched).cloned().collect(),
        })
    }

    /// Emparejado posicional request/response. Una respuesta más larga
    /// que el request es siempre una violación de contrato; una más
    /// corta depende de la política configurada.
    fn align(
        &self,
        store: &mut RouteEntryStore,
        ids: &[String],
        prior: &[(String, FetchState)],
        responses: usize,
    ) -> ClientResult<usize> {
        if responses > ids.len() {
            let reason = format!(
                "backend returned {} results for {} requests",
                responses,
                ids.len()
            );
            return Err(fail_batch(store, ids, EngineError::Backend(reason)));
        }

        if responses < ids.len() {
            match self.alignment {
                AlignmentPolicy::Strict => {
                    let reason = format!(
                        "backend returned {} results for {} requests",
                        responses,
                        ids.len()
                    );
                    return Err(fail_batch(store, ids, EngineError::Backend(reason)));
                }
                AlignmentPolicy::Lenient => {
                    log::warn!(
                        "⚠️ Short batch response: {} of {} routes; trailing entries keep their previous state",
                        responses,
                        ids.len()
                    );
                    for (id, state) in prior.iter().skip(responses) {
                        store.restore_fetch_state(id, state.clone());
                    }
                }
            }
        }

        Ok(responses)
    }
}

fn cost_request(entry: &RouteEntry) -> CostRouteRequest {
    CostRouteRequest {
        start_lat: entry.start.lat,
        start_lng: entry.start.lng,
        end_lat: entry.end.lat,
        end_lng: entry.end.lng,
        route_name: entry.name.clone(),
        driver_salary: entry.driver_salary,
    }
}

fn snapshot_fetch_states(store: &RouteEntryStore, ids: &[String]) -> Vec<(String, FetchState)> {
    ids.iter()
        .map(|id| {
            (
                id.clone(),
                store.get(id).map(|r| r.fetch.clone()).unwrap_or_default(),
            )
        })
        .collect()
}

/// Marcar todas las entradas del lote como fallidas y devolver el error
/// para propagarlo arriba como fallo único de lote
fn fail_batch(store: &mut RouteEntryStore, ids: &[String], error: EngineError) -> EngineError {
    let reason = error.to_string();
    log::error!("❌ Batch request failed: {}", reason);
    for id in ids {
        store.apply_failure(id, reason.clone());
    }
    error
}
