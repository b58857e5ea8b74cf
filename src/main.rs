use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::{info, warn};

use etruck_client::clients::HttpBackendClient;
use etruck_client::config::environment::EnvironmentConfig;
use etruck_client::models::layer::LayerMode;
use etruck_client::services::csv_import;
use etruck_client::services::RequestOrchestrator;
use etruck_client::services::{projector, reconciler};
use etruck_client::state::RouteEntryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚚 E-Truck Route Client");
    info!("=======================");

    let mut args = std::env::args().skip(1);
    let csv_path = args
        .next()
        .context("usage: etruck_client <routes.csv> [single|optimize|simulate]")?;
    let mode = args.next().unwrap_or_else(|| "single".to_string());

    let text = std::fs::read_to_string(&csv_path)
        .with_context(|| format!("cannot read {}", csv_path))?;
    let report = csv_import::parse(&text)?;
    for row in &report.skipped {
        warn!("⚠️ Line {} skipped: {}", row.line, row.reason);
    }
    info!(
        "📋 Imported {} routes ({} skipped)",
        report.entries.len(),
        report.skipped.len()
    );

    let mut store = RouteEntryStore::new();
    store.add_many(report.entries)?;

    let config = EnvironmentConfig::default();
    info!("🌐 Backend: {}", config.backend_url);
    let backend = Arc::new(HttpBackendClient::new(config));
    let orchestrator = RequestOrchestrator::new(backend);

    let layer_mode = match mode.as_str() {
        "optimize" => {
            let summary = orchestrator.fetch_batch_optimization(&mut store).await?;
            info!(
                "💶 Base {:.2} EUR → optimized {:.2} EUR ({:.2} EUR saved, {:.1}%, {} swaps)",
                summary.base_cost_eur,
                summary.optimized_cost_eur,
                summary.cost_savings_eur,
                summary.cost_savings_percentage,
                summary.swaps.len()
            );
            LayerMode::Optimization
        }
        "simulate" => {
            let summary = orchestrator.fetch_batch_simulation(&mut store).await?;
            info!(
                "🛰️ Simulated {} routes: {:.1} km, {:.0} min, {:.2} EUR",
                summary.matched,
                summary.total_distance_km,
                summary.total_duration_minutes,
                summary.total_cost_eur
            );
            LayerMode::Simulation
        }
        _ => {
            let outcomes = orchestrator.fetch_single_routes(&mut store).await;
            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            info!(
                "📡 {} routes fetched, {} failed",
                outcomes.len() - failed,
                failed
            );
            LayerMode::Simulation
        }
    };

    info!("📊 Summary (ranked by total cost):");
    for summary in reconciler::summaries(&store) {
        match summary.total_cost_eur {
            Some(cost) => info!(
                "   {} | {:.1} km, {:.0} min, {:.2} EUR, {} stops, {} breaks, {} swaps",
                summary.name,
                summary.distance_km.unwrap_or(0.0),
                summary.duration_minutes.unwrap_or(0.0),
                cost,
                summary.charging_stops,
                summary.driver_breaks,
                summary.swap_events
            ),
            None => match summary.error {
                Some(reason) => warn!("   {} | no result ({})", summary.name, reason),
                None => info!("   {} | no result", summary.name),
            },
        }
    }

    let layers = reconciler::layers(&store, layer_mode);
    if let Some(bounds) = projector::fit_bounds(&layers) {
        let center = bounds.center();
        info!(
            "🗺️ Map bounds SW ({:.4}, {:.4}) → NE ({:.4}, {:.4}), center ({:.4}, {:.4})",
            bounds.south_west.lat,
            bounds.south_west.lng,
            bounds.north_east.lat,
            bounds.north_east.lng,
            center.lat,
            center.lng
        );
    }

    Ok(())
}
