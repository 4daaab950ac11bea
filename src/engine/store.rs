use crate::model::{BookingState, CellEntry, DateKey};

/// Canonical occupancy state: sparse unit → date → cell mapping.
///
/// Pure container — all policy (status cycling, month scoping, filtering)
/// lives in the engine's mutation and query layers.
#[derive(Debug, Default)]
pub struct BookingStore {
    state: BookingState,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: BookingState) -> Self {
        Self { state }
    }

    /// Full state, for serialization.
    pub fn state(&self) -> &BookingState {
        &self.state
    }

    /// Replace the entire state (snapshot import).
    pub fn replace(&mut self, state: BookingState) {
        self.state = state;
    }

    /// Materialized entry, if any.
    pub fn get(&self, unit_id: &str, date_key: &str) -> Option<&CellEntry> {
        self.state.get(unit_id).and_then(|days| days.get(date_key))
    }

    /// Entry for a unit/day, defaulting to the vacant cell when absent.
    /// Callers never need to distinguish "missing" from "empty".
    pub fn get_or_default(&self, unit_id: &str, date_key: &str) -> CellEntry {
        self.get(unit_id, date_key).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, unit_id: &str, date_key: &str, entry: CellEntry) {
        self.state
            .entry(unit_id.to_string())
            .or_default()
            .insert(date_key.to_string(), entry);
    }

    /// Remove one cell key. Removing an absent key is a no-op.
    pub fn remove(&mut self, unit_id: &str, date_key: &str) {
        if let Some(days) = self.state.get_mut(unit_id) {
            days.remove(date_key);
        }
    }

    /// Occupant name for a unit/day, `""` when absent.
    pub fn name_at(&self, unit_id: &str, date_key: &str) -> &str {
        self.get(unit_id, date_key).map_or("", |e| e.name.as_str())
    }

    /// Date keys with a materialized entry for `unit_id`.
    pub fn dates_for_unit(&self, unit_id: &str) -> Vec<DateKey> {
        self.state
            .get(unit_id)
            .map(|days| days.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Count of materialized cells across all units.
    pub fn cell_count(&self) -> usize {
        self.state.values().map(|days| days.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    #[test]
    fn absent_cell_reads_as_default() {
        let store = BookingStore::new();
        let cell = store.get_or_default("R1", "2024-03-05");
        assert_eq!(cell, CellEntry::default());
        assert!(store.get("R1", "2024-03-05").is_none());
    }

    #[test]
    fn set_then_get() {
        let mut store = BookingStore::new();
        let entry = CellEntry {
            status: Status::Booked,
            name: "Ana".into(),
            deposit: true,
        };
        store.set("R1", "2024-03-05", entry.clone());
        assert_eq!(store.get_or_default("R1", "2024-03-05"), entry);
        assert_eq!(store.name_at("R1", "2024-03-05"), "Ana");
        assert_eq!(store.cell_count(), 1);
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let mut store = BookingStore::new();
        store.remove("R1", "2024-03-05");
        assert_eq!(store.cell_count(), 0);

        store.set("R1", "2024-03-05", CellEntry::default());
        store.remove("R1", "2024-03-05");
        assert!(store.get("R1", "2024-03-05").is_none());
    }

    #[test]
    fn units_are_isolated() {
        let mut store = BookingStore::new();
        store.set(
            "R1",
            "2024-03-05",
            CellEntry {
                status: Status::Reserved,
                ..CellEntry::default()
            },
        );
        assert!(store.get("R2", "2024-03-05").is_none());
        assert_eq!(store.dates_for_unit("R1"), vec!["2024-03-05".to_string()]);
        assert!(store.dates_for_unit("R2").is_empty());
    }
}
