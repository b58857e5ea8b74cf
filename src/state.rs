//! Estado compartido del cliente
//!
//! Este módulo define el store autoritativo de entradas de ruta y el
//! cursor de selección activa. Las mutaciones son síncronas y nunca
//! originan llamadas de red por sí mismas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::route_entry::{RouteEntry, RouteEntryDraft};
use crate::models::route_result::RouteResult;
use crate::utils::errors::ClientResult;

/// Estado de fetch por entrada; independiente de la selección
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "reason")]
pub enum FetchState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// Entrada más su estado de fetch y su último resultado válido.
///
/// `fetch` y `result` van en campos separados a propósito: un fallo
/// cambia `fetch` pero deja `result` intacto, de modo que la UI puede
/// seguir mostrando el dato anterior con un badge de error.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub entry: RouteEntry,
    pub fetch: FetchState,
    pub result: Option<RouteResult>,
}

/// Store de entradas de ruta en orden de inserción
#[derive(Debug, Default)]
pub struct RouteEntryStore {
    records: Vec<RouteRecord>,
    selected: Option<String>,
}

impl RouteEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añadir una entrada validada; pasa a ser la selección activa
    pub fn add(&mut self, draft: RouteEntryDraft) -> ClientResult<String> {
        draft.validate()?;
        let id = self.fresh_id();
        self.records.push(RouteRecord {
            entry: RouteEntry::from_draft(id.clone(), draft),
            fetch: FetchState::Idle,
            result: None,
        });
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Añadir un lote; la validación es previa y atómica, y la primera
    /// entrada del lote pasa a ser la selección activa
    pub fn add_many(&mut self, drafts: Vec<RouteEntryDraft>) -> ClientResult<Vec<String>> {
        for draft in &drafts {
            draft.validate()?;
        }

        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = self.fresh_id();
            self.records.push(RouteRecord {
                entry: RouteEntry::from_draft(id.clone(), draft),
                fetch: FetchState::Idle,
                result: None,
            });
            ids.push(id);
        }

        if let Some(first) = ids.first() {
            self.selected = Some(first.clone());
        }
        Ok(ids)
    }

    /// Eliminar por id; ids desconocidos son un no-op
    pub fn remove(&mut self, id: &str) {
        let before = self.records.len();
        self.records.retain(|r| r.entry.id != id);
        if self.records.len() == before {
            return;
        }

        if self.selected.as_deref() == Some(id) {
            self.selected = self.records.first().map(|r| r.entry.id.clone());
        }
    }

    /// Vaciar store y selección
    pub fn clear(&mut self) {
        self.records.clear();
        self.selected = None;
    }

    /// Seleccionar una entrada existente; devuelve false si el id no existe
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: &str) -> Option<&RouteRecord> {
        self.records.iter().find(|r| r.entry.id == id)
    }

    /// Todas las entradas en orden de inserción estable
    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.records.iter().map(|r| &r.entry)
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.entry.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&RouteRecord> {
        self.selected
            .as_deref()
            .and_then(|id| self.get(id))
    }

    /// Marcar una entrada como en vuelo
    pub fn mark_pending(&mut self, id: &str) {
        if let Some(record) = self.get_mut(id) {
            record.fetch = FetchState::Pending;
        }
    }

    /// Registrar un resultado correcto; reemplaza el anterior entero
    pub fn apply_success(&mut self, id: &str, result: RouteResult) {
        if let Some(record) = self.get_mut(id) {
            record.fetch = FetchState::Succeeded;
            record.result = Some(result);
        }
    }

    /// Registrar un fallo; el resultado previo, si existe, queda intacto
    pub fn apply_failure(&mut self, id: &str, reason: String) {
        if let Some(record) = self.get_mut(id) {
            record.fetch = FetchState::Failed(reason);
        }
    }

    /// Restaurar un estado de fetch capturado antes de una llamada por lotes
    pub fn restore_fetch_state(&mut self, id: &str, state: FetchState) {
        if let Some(record) = self.get_mut(id) {
            record.fetch = state;
        }
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut RouteRecord> {
        self.records.iter_mut().find(|r| r.entry.id == id)
    }

    /// Id fresco, comprobado contra colisiones en el store
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl RouteRecord {
    /// Último resultado mostrable, con independencia del estado de fetch
    pub fn display_result(&self) -> Option<&RouteResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geo::GeoPoint;
    use crate::models::route_result::CostBreakdown;
    use crate::utils::errors::EngineError;

    fn draft(name: &str) -> RouteEntryDraft {
        RouteEntryDraft::new(
            name,
            GeoPoint::new(52.52, 13.405).unwrap(),
            GeoPoint::new(48.137, 11.575).unwrap(),
        )
    }

    fn result(distance_km: f64) -> RouteResult {
        RouteResult {
            path: vec![],
            distance_km,
            duration_minutes: 60.0,
            segments: vec![],
            charging_stops: vec![],
            driver_breaks: vec![],
            swap_events: vec![],
            costs: CostBreakdown::default(),
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_add_selects_entry() {
        let mut store = RouteEntryStore::new();
        let id = store.add(draft("A")).unwrap();
        assert_eq!(store.selected_id(), Some(id.as_str()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_many_selects_first_of_batch() {
        let mut store = RouteEntryStore::new();
        store.add(draft("existing")).unwrap();
        let ids = store.add_many(vec![draft("A"), draft("B")]).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(store.selected_id(), Some(ids[0].as_str()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_many_is_atomic_on_invalid_draft() {
        let mut store = RouteEntryStore::new();
        let mut bad = draft("bad");
        bad.driver_count = 0;
        assert!(store.add_many(vec![draft("ok"), bad]).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_batches() {
        let mut store = RouteEntryStore::new();
        let first = store.add_many(vec![draft("A"), draft("B")]).unwrap();
        let second = store.add_many(vec![draft("A"), draft("B")]).unwrap();
        let mut all: Vec<String> = first.into_iter().chain(second).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_remove_active_falls_back_to_first() {
        let mut store = RouteEntryStore::new();
        let a = store.add(draft("A")).unwrap();
        let b = store.add(draft("B")).unwrap();
        // B es la selección activa tras el último add
        assert_eq!(store.selected_id(), Some(b.as_str()));
        store.remove(&b);
        assert_eq!(store.selected_id(), Some(a.as_str()));
    }

    #[test]
    fn test_remove_last_entry_clears_selection() {
        let mut store = RouteEntryStore::new();
        let a = store.add(draft("A")).unwrap();
        store.remove(&a);
        assert!(store.is_empty());
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn test_remove_inactive_keeps_selection() {
        let mut store = RouteEntryStore::new();
        let a = store.add(draft("A")).unwrap();
        let b = store.add(draft("B")).unwrap();
        store.remove(&a);
        assert_eq!(store.selected_id(), Some(b.as_str()));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = RouteEntryStore::new();
        let a = store.add(draft("A")).unwrap();
        store.remove("missing");
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected_id(), Some(a.as_str()));
    }

    #[test]
    fn test_selection_invariant_over_mutation_sequences() {
        let mut store = RouteEntryStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(store.add(draft(&format!("R{}", i))).unwrap());
        }
        for id in ids {
            store.remove(&id);
            match store.selected_id() {
                Some(sel) => assert!(store.get(sel).is_some()),
                None => assert!(store.is_empty()),
            }
        }
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = RouteEntryStore::new();
        store.add(draft("A")).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let mut store = RouteEntryStore::new();
        let id = store.add(draft("A")).unwrap();
        store.apply_success(&id, result(500.0));
        store.apply_failure(&id, "timeout".to_string());

        let record = store.get(&id).unwrap();
        assert_eq!(record.fetch, FetchState::Failed("timeout".to_string()));
        assert_eq!(record.result.as_ref().unwrap().distance_km, 500.0);
    }

    #[test]
    fn test_success_after_failure_overwrites_error_state() {
        let mut store = RouteEntryStore::new();
        let id = store.add(draft("A")).unwrap();
        store.apply_failure(&id, "network down".to_string());
        store.apply_success(&id, result(480.0));

        let record = store.get(&id).unwrap();
        assert_eq!(record.fetch, FetchState::Succeeded);
        assert_eq!(record.result.as_ref().unwrap().distance_km, 480.0);
    }

    #[test]
    fn test_rejects_invalid_draft() {
        let mut store = RouteEntryStore::new();
        let mut bad = draft("bad");
        bad.name = String::new();
        match store.add(bad) {
            Err(EngineError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
