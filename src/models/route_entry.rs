//! Modelo de entrada de ruta
//!
//! Este módulo contiene el borrador que produce el formulario o el
//! import CSV y la entrada definitiva con id asignado por el store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::geo::GeoPoint;

/// Tipo de camión por defecto cuando el origen (p.ej. CSV) no lo indica
pub const DEFAULT_TRUCK_KEY: &str = "electric";

/// Criterio de optimización elegido por el usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeBy {
    Time,
    #[default]
    Cost,
}

/// Borrador de entrada de ruta, previo a la asignación de id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RouteEntryDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub start: GeoPoint,
    pub end: GeoPoint,

    pub optimize_by: OptimizeBy,
    pub truck_key: String,

    #[validate(range(min = 1))]
    pub driver_count: u32,

    #[validate(range(min = 0.01))]
    pub driver_salary: Option<f64>,
}

impl RouteEntryDraft {
    /// Borrador con los valores por defecto del formulario
    pub fn new(name: impl Into<String>, start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            optimize_by: OptimizeBy::default(),
            truck_key: DEFAULT_TRUCK_KEY.to_string(),
            driver_count: 1,
            driver_salary: None,
        }
    }
}

/// Entrada de ruta definitiva; el id es único e inmutable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    pub id: String,
    pub name: String,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub optimize_by: OptimizeBy,
    pub truck_key: String,
    pub driver_count: u32,
    pub driver_salary: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl RouteEntry {
    pub fn from_draft(id: String, draft: RouteEntryDraft) -> Self {
        Self {
            id,
            name: draft.name,
            start: draft.start,
            end: draft.end,
            optimize_by: draft.optimize_by,
            truck_key: draft.truck_key,
            driver_count: draft.driver_count,
            driver_salary: draft.driver_salary,
            created_at: Utc::now(),
        }
    }
}
