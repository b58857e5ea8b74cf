//! Reconciliación de respuestas del backend
//!
//! Este módulo convierte cada forma de respuesta del backend en el
//! `RouteResult` canónico (un adaptador por modo) y proyecta entradas
//! más resultados en capas de mapa y filas de resumen. El código de
//! render nunca toca formas de wire.

use std::cmp::Ordering;

use crate::dto::multi_route_dto::MultiRouteResultDto;
use crate::dto::optimization_dto::TruckSwapDto;
use crate::dto::reference_dto::ChargingStationDto;
use crate::dto::route_dto::{
    ChargingStopDto, CoordinateDto, CostRouteResponse, DriverBreakDto, RouteCostsDto,
    RouteSegmentDto,
};
use crate::models::geo::GeoPoint;
use crate::models::layer::{LayerMode, RouteLayer, RouteSummary};
use crate::models::route_entry::RouteEntry;
use crate::models::route_result::{
    ChargingStop, CostBreakdown, DriverBreak, DriverBreakKind, RouteResult, RouteSegment,
    SwapEvent,
};
use crate::state::{FetchState, RouteEntryStore};
use crate::utils::errors::ClientResult;
use crate::utils::geo;

/// Paleta de colores de capa, ciclada por orden de inserción
const LAYER_PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

pub fn layer_color(index: usize) -> &'static str {
    LAYER_PALETTE[index % LAYER_PALETTE.len()]
}

/// Adaptador de la respuesta de /calculate-costs (y /route)
pub fn route_result_from_single(response: &CostRouteResponse) -> RouteResult {
    let segments: Vec<RouteSegment> = response.route_segments.iter().map(segment_from_dto).collect();

    // Polilínea: concatenación de tramos en orden; si el backend no dio
    // coordenadas por tramo, cae a la polilínea de nivel superior
    let mut path: Vec<GeoPoint> = segments
        .iter()
        .flat_map(|segment| segment.coordinates.iter().copied())
        .collect();
    if path.is_empty() {
        path = response.coordinates.iter().map(point_from_coordinate).collect();
    }

    RouteResult {
        path,
        distance_km: response.distance_km,
        duration_minutes: response.duration_minutes,
        segments,
        charging_stops: response
            .charging_stops
            .iter()
            .filter_map(stop_from_detailed)
            .collect(),
        driver_breaks: response.driver_breaks.iter().map(break_from_dto).collect(),
        swap_events: Vec::new(),
        costs: response
            .total_costs
            .as_ref()
            .map(costs_from_dto)
            .unwrap_or_default(),
        raw: serde_json::to_value(response).unwrap_or(serde_json::Value::Null),
    }
}

/// Adaptador de una ruta dentro de la respuesta de /optimize; adjunta
/// los swaps del lote que pertenecen a esta ruta
pub fn route_result_from_optimized(
    route: &CostRouteResponse,
    swaps: &[TruckSwapDto],
    route_index: usize,
) -> RouteResult {
    let mut result = route_result_from_single(route);
    result.swap_events = swaps
        .iter()
        .filter(|swap| swap.route_idx == Some(route_index))
        .map(swap_event_from_dto)
        .collect();
    result
}

/// Adaptador de una ruta dentro de la respuesta de /multi-route; el
/// simulador habla en metros y segundos
pub fn route_result_from_simulation(dto: &MultiRouteResultDto) -> RouteResult {
    let segments: Vec<RouteSegment> = dto
        .route_segments
        .iter()
        .map(|segment| RouteSegment {
            start: GeoPoint::from_pair(segment.start_point),
            end: GeoPoint::from_pair(segment.end_point),
            distance_km: segment.distance / 1000.0,
            duration_minutes: segment.duration / 60.0,
            energy_kwh: Some(segment.energy_consumption),
            coordinates: Vec::new(),
            driver_id: None,
        })
        .collect();

    let charging_stops = dto
        .charging_stops
        .iter()
        .filter_map(|stop| {
            let station = &stop.charging_station;
            let (lat, lng) = (station.latitude?, station.longitude?);
            Some(ChargingStop {
                station_id: station.id,
                station_name: station.operator_name.clone().or_else(|| station.name.clone()),
                position: GeoPoint { lat, lng },
                price_per_kwh: station.price_per_kwh,
                charging_time_minutes: Some(stop.charging_time),
                charging_cost_eur: Some(stop.charging_cost),
            })
        })
        .collect();

    let breakdown = dto.cost_breakdown.clone().unwrap_or_default();

    RouteResult {
        path: dto.coordinates.iter().map(point_from_coordinate).collect(),
        distance_km: dto.total_distance / 1000.0,
        duration_minutes: dto.total_duration / 60.0,
        segments,
        charging_stops,
        driver_breaks: dto.driver_breaks.iter().map(break_from_dto).collect(),
        swap_events: Vec::new(),
        costs: CostBreakdown {
            driver_eur: breakdown.driver_cost,
            charging_eur: breakdown.charging_cost,
            total_eur: dto.total_cost,
            ..CostBreakdown::default()
        },
        raw: serde_json::to_value(dto).unwrap_or(serde_json::Value::Null),
    }
}

pub fn swap_event_from_dto(dto: &TruckSwapDto) -> SwapEvent {
    SwapEvent {
        station_id: dto.station_id,
        location: GeoPoint::from_pair(dto.station_location),
        driver_a: dto.driver1_id.clone(),
        driver_b: dto.driver2_id.clone(),
        benefit_km: dto.benefit_km,
        reason: dto.reason.clone(),
        route_index: dto.route_idx,
    }
}

/// Proyección de una entrada más su último resultado a capa de mapa.
///
/// La capa lleva siempre algo dibujable: sin resultado, la línea es el
/// segmento recto entre los extremos de la entrada.
pub fn to_layer(
    entry: &RouteEntry,
    result: Option<&RouteResult>,
    mode: LayerMode,
    color_index: usize,
    highlighted: bool,
) -> RouteLayer {
    let line = match result {
        Some(r) if !r.path.is_empty() => r.path.clone(),
        Some(r) if !r.segments.is_empty() => {
            // Solo se conocen extremos por tramo: polilínea de dos puntos
            // por tramo, encadenada
            let mut line = Vec::with_capacity(r.segments.len() + 1);
            for (index, segment) in r.segments.iter().enumerate() {
                if index == 0 {
                    line.push(segment.start);
                }
                line.push(segment.end);
            }
            line
        }
        _ => vec![entry.start, entry.end],
    };

    let (charging_stops, driver_breaks, swap_events) = match result {
        Some(r) => (
            r.charging_stops.clone(),
            r.driver_breaks.clone(),
            r.swap_events.clone(),
        ),
        None => (Vec::new(), Vec::new(), Vec::new()),
    };

    // Marcador singular: primer swap real, o el punto medio de la línea
    // como marca cosmética
    let swap_point = swap_events
        .first()
        .map(|swap| swap.location)
        .or_else(|| line.get(line.len() / 2).copied());

    RouteLayer {
        id: entry.id.clone(),
        color: layer_color(color_index).to_string(),
        line,
        charging_stops,
        driver_breaks,
        swap_events,
        swap_point,
        start_point: entry.start,
        end_point: entry.end,
        highlighted,
        mode,
    }
}

/// Capas para todas las entradas del store, en orden de inserción
pub fn layers(store: &RouteEntryStore, mode: LayerMode) -> Vec<RouteLayer> {
    store
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let highlighted = store.selected_id() == Some(record.entry.id.as_str());
            to_layer(&record.entry, record.display_result(), mode, index, highlighted)
        })
        .collect()
}

/// Filas de resumen ordenadas por coste total ascendente; las entradas
/// sin resultado van al final en orden de inserción
pub fn summaries(store: &RouteEntryStore) -> Vec<RouteSummary> {
    let mut rows: Vec<RouteSummary> = store
        .records()
        .iter()
        .map(|record| {
            let result = record.display_result();
            RouteSummary {
                id: record.entry.id.clone(),
                name: record.entry.name.clone(),
                truck_key: record.entry.truck_key.clone(),
                fetch: record.fetch.clone(),
                distance_km: result.map(|r| r.distance_km),
                duration_minutes: result.map(|r| r.duration_minutes),
                total_cost_eur: result.map(|r| r.costs.total_eur),
                charging_stops: result.map(|r| r.charging_stops.len()).unwrap_or(0),
                driver_breaks: result.map(|r| r.driver_breaks.len()).unwrap_or(0),
                swap_events: result.map(|r| r.swap_events.len()).unwrap_or(0),
                error: match &record.fetch {
                    FetchState::Failed(reason) => Some(reason.clone()),
                    _ => None,
                },
            }
        })
        .collect();

    rows.sort_by(|a, b| match (a.total_cost_eur, b.total_cost_eur) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows
}

/// Etiqueta informativa de una pausa en modo simulación
pub fn break_annotation(
    location: &GeoPoint,
    stations: &[ChargingStationDto],
) -> ClientResult<String> {
    let station = geo::nearest(location, stations)?;
    Ok(format!("near {}", station.operator_name))
}

fn point_from_coordinate(dto: &CoordinateDto) -> GeoPoint {
    GeoPoint {
        lat: dto.latitude,
        lng: dto.longitude,
    }
}

fn segment_from_dto(dto: &RouteSegmentDto) -> RouteSegment {
    RouteSegment {
        start: GeoPoint::from_pair(dto.start_point),
        end: GeoPoint::from_pair(dto.end_point),
        distance_km: dto.distance_km,
        duration_minutes: dto.duration_minutes,
        energy_kwh: dto.energy_consumption_kwh,
        coordinates: dto.coordinates.iter().map(point_from_coordinate).collect(),
        driver_id: dto.driver_id.clone(),
    }
}

/// Paradas sin coordenadas de estación se descartan en silencio
fn stop_from_detailed(dto: &ChargingStopDto) -> Option<ChargingStop> {
    let station = &dto.charging_station;
    let (lat, lng) = (station.latitude?, station.longitude?);
    Some(ChargingStop {
        station_id: station.id,
        station_name: station.operator_name.clone().or_else(|| station.name.clone()),
        position: GeoPoint { lat, lng },
        price_per_kwh: station.price_per_kwh,
        charging_time_minutes: dto.charging_time_hours.map(|hours| hours * 60.0),
        charging_cost_eur: dto.charging_cost_eur,
    })
}

fn break_from_dto(dto: &DriverBreakDto) -> DriverBreak {
    DriverBreak {
        kind: DriverBreakKind::parse(&dto.break_type),
        location: GeoPoint::from_pair(dto.location),
        start_minutes: dto.start_time / 60.0,
        duration_minutes: dto.duration / 60.0,
    }
}

fn costs_from_dto(dto: &RouteCostsDto) -> CostBreakdown {
    CostBreakdown {
        driver_eur: dto.driver_cost_eur,
        energy_eur: dto.energy_cost_eur.unwrap_or(0.0),
        depreciation_eur: dto.depreciation_cost_eur,
        tolls_eur: dto.tolls_cost_eur,
        charging_eur: dto.charging_cost_eur,
        total_eur: dto.total_cost_eur,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::route_dto::ChargingStationRefDto;
    use crate::models::route_entry::RouteEntryDraft;
    use crate::state::RouteEntryStore;

    fn entry(name: &str) -> RouteEntry {
        RouteEntry::from_draft(
            format!("id-{}", name),
            RouteEntryDraft::new(
                name,
                GeoPoint::new(52.52, 13.405).unwrap(),
                GeoPoint::new(48.137, 11.575).unwrap(),
            ),
        )
    }

    fn empty_result() -> RouteResult {
        RouteResult {
            path: vec![],
            distance_km: 0.0,
            duration_minutes: 0.0,
            segments: vec![],
            charging_stops: vec![],
            driver_breaks: vec![],
            swap_events: vec![],
            costs: CostBreakdown::default(),
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_layer_without_result_is_straight_line() {
        let e = entry("A");
        let layer = to_layer(&e, None, LayerMode::Simulation, 0, false);
        assert_eq!(layer.line, vec![e.start, e.end]);
        assert!(layer.charging_stops.is_empty());
        assert_eq!(layer.mode, LayerMode::Simulation);
    }

    #[test]
    fn test_layer_concatenates_segment_polylines() {
        let e = entry("A");
        let mut result = empty_result();
        result.path = vec![
            GeoPoint::new(52.52, 13.405).unwrap(),
            GeoPoint::new(50.0, 12.0).unwrap(),
            GeoPoint::new(48.137, 11.575).unwrap(),
        ];
        let layer = to_layer(&e, Some(&result), LayerMode::Simulation, 0, false);
        assert_eq!(layer.line.len(), 3);
        assert_eq!(layer.line[1], GeoPoint::new(50.0, 12.0).unwrap());
    }

    #[test]
    fn test_layer_falls_back_to_two_point_segments() {
        let e = entry("A");
        let mut result = empty_result();
        result.segments = vec![
            RouteSegment {
                start: GeoPoint::new(52.52, 13.405).unwrap(),
                end: GeoPoint::new(50.0, 12.0).unwrap(),
                distance_km: 250.0,
                duration_minutes: 180.0,
                energy_kwh: None,
                coordinates: vec![],
                driver_id: None,
            },
            RouteSegment {
                start: GeoPoint::new(50.0, 12.0).unwrap(),
                end: GeoPoint::new(48.137, 11.575).unwrap(),
                distance_km: 254.0,
                duration_minutes: 190.0,
                energy_kwh: None,
                coordinates: vec![],
                driver_id: None,
            },
        ];
        let layer = to_layer(&e, Some(&result), LayerMode::Simulation, 0, false);
        assert_eq!(
            layer.line,
            vec![
                GeoPoint::new(52.52, 13.405).unwrap(),
                GeoPoint::new(50.0, 12.0).unwrap(),
                GeoPoint::new(48.137, 11.575).unwrap(),
            ]
        );
    }

    #[test]
    fn test_swap_point_prefers_first_swap_event() {
        let e = entry("A");
        let mut result = empty_result();
        let swap_location = GeoPoint::new(51.0, 12.5).unwrap();
        result.swap_events = vec![SwapEvent {
            station_id: 7,
            location: swap_location,
            driver_a: "1".to_string(),
            driver_b: "2".to_string(),
            benefit_km: 40.0,
            reason: "alignment".to_string(),
            route_index: Some(0),
        }];
        let layer = to_layer(&e, Some(&result), LayerMode::Optimization, 0, false);
        assert_eq!(layer.swap_point, Some(swap_location));
    }

    #[test]
    fn test_swap_point_falls_back_to_line_midpoint() {
        let e = entry("A");
        let mut result = empty_result();
        result.path = vec![
            GeoPoint::new(52.0, 13.0).unwrap(),
            GeoPoint::new(51.0, 12.5).unwrap(),
            GeoPoint::new(50.0, 12.0).unwrap(),
            GeoPoint::new(49.0, 11.8).unwrap(),
            GeoPoint::new(48.0, 11.5).unwrap(),
        ];
        let layer = to_layer(&e, Some(&result), LayerMode::Simulation, 0, false);
        // floor(5 / 2) = índice 2
        assert_eq!(layer.swap_point, Some(result.path[2]));
    }

    #[test]
    fn test_single_adapter_drops_stops_without_coordinates() {
        let response = CostRouteResponse {
            success: true,
            message: None,
            route_name: None,
            distance_km: 500.0,
            duration_minutes: 400.0,
            coordinates: vec![],
            route_segments: vec![],
            charging_stops: vec![
                ChargingStopDto {
                    stop_number: Some(1),
                    charging_station: ChargingStationRefDto {
                        id: Some(1),
                        operator_name: Some("Ionity".to_string()),
                        latitude: Some(50.0),
                        longitude: Some(12.0),
                        ..ChargingStationRefDto::default()
                    },
                    arrival_battery_kwh: None,
                    departure_battery_kwh: None,
                    energy_to_charge_kwh: None,
                    charging_time_hours: Some(0.5),
                    charging_cost_eur: Some(42.0),
                },
                ChargingStopDto {
                    stop_number: Some(2),
                    charging_station: ChargingStationRefDto::default(),
                    arrival_battery_kwh: None,
                    departure_battery_kwh: None,
                    energy_to_charge_kwh: None,
                    charging_time_hours: None,
                    charging_cost_eur: None,
                },
            ],
            driver_breaks: vec![],
            total_costs: None,
            truck_model: None,
            driver: None,
        };

        let result = route_result_from_single(&response);
        assert_eq!(result.charging_stops.len(), 1);
        assert_eq!(result.charging_stops[0].station_name.as_deref(), Some("Ionity"));
        assert_eq!(result.charging_stops[0].charging_time_minutes, Some(30.0));
    }

    #[test]
    fn test_simulation_adapter_converts_units() {
        let dto = MultiRouteResultDto {
            total_distance: 504_000.0,
            total_duration: 21_600.0,
            driving_duration: 18_000.0,
            total_energy_consumption: 600.0,
            total_cost: 820.0,
            cost_breakdown: Some(crate::dto::multi_route_dto::SimCostBreakdownDto {
                driver_cost: 460.0,
                charging_cost: 360.0,
            }),
            route_segments: vec![],
            coordinates: vec![
                CoordinateDto {
                    latitude: 52.52,
                    longitude: 13.405,
                },
                CoordinateDto {
                    latitude: 48.137,
                    longitude: 11.575,
                },
            ],
            charging_stops: vec![],
            nearby_charging_stations: vec![],
            driver_breaks: vec![DriverBreakDto {
                break_type: "long_rest".to_string(),
                location: [50.0, 12.0],
                start_time: 16_200.0,
                duration: 39_600.0,
            }],
            feasible: true,
        };

        let result = route_result_from_simulation(&dto);
        assert!((result.distance_km - 504.0).abs() < 1e-9);
        assert!((result.duration_minutes - 360.0).abs() < 1e-9);
        assert_eq!(result.path.len(), 2);
        assert_eq!(result.driver_breaks[0].kind, DriverBreakKind::LongRest);
        assert!((result.driver_breaks[0].duration_minutes - 660.0).abs() < 1e-9);
        assert!((result.costs.total_eur - 820.0).abs() < 1e-9);
    }

    #[test]
    fn test_optimized_adapter_attaches_route_swaps() {
        let route = CostRouteResponse {
            success: true,
            message: None,
            route_name: Some("A".to_string()),
            distance_km: 500.0,
            duration_minutes: 400.0,
            coordinates: vec![],
            route_segments: vec![],
            charging_stops: vec![],
            driver_breaks: vec![],
            total_costs: None,
            truck_model: None,
            driver: None,
        };
        let swaps = vec![
            TruckSwapDto {
                station_id: 3,
                station_location: [51.0, 12.5],
                driver1_id: "1".to_string(),
                driver2_id: "2".to_string(),
                benefit_km: 35.0,
                alignment_dot: 0.9,
                reason: "shared station".to_string(),
                detour_km_total: 4.0,
                iteration: Some(1),
                route_idx: Some(0),
                global_iteration: Some(1),
            },
            TruckSwapDto {
                station_id: 9,
                station_location: [49.0, 10.0],
                driver1_id: "3".to_string(),
                driver2_id: "4".to_string(),
                benefit_km: 12.0,
                alignment_dot: 0.7,
                reason: "shared station".to_string(),
                detour_km_total: 2.0,
                iteration: Some(1),
                route_idx: Some(1),
                global_iteration: Some(2),
            },
        ];

        let result = route_result_from_optimized(&route, &swaps, 0);
        assert_eq!(result.swap_events.len(), 1);
        assert_eq!(result.swap_events[0].station_id, 3);
    }

    #[test]
    fn test_summaries_rank_by_cost_unfetched_last() {
        let mut store = RouteEntryStore::new();
        let a = store
            .add(RouteEntryDraft::new(
                "expensive",
                GeoPoint::new(52.0, 13.0).unwrap(),
                GeoPoint::new(48.0, 11.0).unwrap(),
            ))
            .unwrap();
        let b = store
            .add(RouteEntryDraft::new(
                "unfetched",
                GeoPoint::new(52.0, 13.0).unwrap(),
                GeoPoint::new(48.0, 11.0).unwrap(),
            ))
            .unwrap();
        let c = store
            .add(RouteEntryDraft::new(
                "cheap",
                GeoPoint::new(52.0, 13.0).unwrap(),
                GeoPoint::new(48.0, 11.0).unwrap(),
            ))
            .unwrap();

        let mut expensive = empty_result();
        expensive.costs.total_eur = 900.0;
        store.apply_success(&a, expensive);

        let mut cheap = empty_result();
        cheap.costs.total_eur = 300.0;
        store.apply_success(&c, cheap);

        let rows = summaries(&store);
        assert_eq!(rows[0].name, "cheap");
        assert_eq!(rows[1].name, "expensive");
        assert_eq!(rows[2].name, "unfetched");
        let _ = b;
    }

    #[test]
    fn test_break_annotation_uses_nearest_station() {
        let stations = vec![
            ChargingStationDto {
                id: 1,
                country: "DE".to_string(),
                latitude: 50.01,
                longitude: 10.0,
                truck_suitability: "yes".to_string(),
                operator_name: "Ionity".to_string(),
                max_power_kw: 350.0,
                price_per_kwh: 0.55,
            },
            ChargingStationDto {
                id: 2,
                country: "DE".to_string(),
                latitude: 60.0,
                longitude: 20.0,
                truck_suitability: "limited".to_string(),
                operator_name: "EnBW".to_string(),
                max_power_kw: 150.0,
                price_per_kwh: 0.49,
            },
        ];
        let point = GeoPoint::new(50.0, 10.0).unwrap();
        assert_eq!(break_annotation(&point, &stations).unwrap(), "near Ionity");
    }

    #[test]
    fn test_layers_tagged_with_mode_per_entry() {
        let mut store = RouteEntryStore::new();
        store
            .add(RouteEntryDraft::new(
                "A",
                GeoPoint::new(52.0, 13.0).unwrap(),
                GeoPoint::new(48.0, 11.0).unwrap(),
            ))
            .unwrap();

        let simulation = layers(&store, LayerMode::Simulation);
        let optimization = layers(&store, LayerMode::Optimization);
        assert_eq!(simulation[0].mode, LayerMode::Simulation);
        assert_eq!(optimization[0].mode, LayerMode::Optimization);
        // Misma entrada, capas distintas por modo: nunca se funden
        assert_eq!(simulation[0].id, optimization[0].id);
        assert_ne!(simulation[0].mode, optimization[0].mode);
    }
}
