mod error;
mod mutations;
mod queries;
mod store;

pub use error::EngineError;
pub use mutations::cycle_status;
pub use queries::{filter_units, KindFilter};
pub use store::BookingStore;

use tracing::{debug, warn};

use crate::calendar;
use crate::model::{CellEntry, Unit};
use crate::snapshot;
use crate::storage::Storage;

/// Result of a cell click: the entry as written, plus whether the UI layer
/// should open a name-entry prompt for this unit/day. The prompt request is
/// a signal, not state — the status change stands even if the prompt is
/// dismissed without saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub entry: CellEntry,
    pub name_entry_requested: bool,
}

/// The booking state engine: owns the unit roster, the canonical occupancy
/// state, the displayed view (month/year/search/kind filter), and the
/// storage handle. Every mutation commits a full-state snapshot.
pub struct Engine {
    units: Vec<Unit>,
    store: BookingStore,
    storage: Storage,
    year: i32,
    month0: u32,
    search: String,
    kind_filter: KindFilter,
}

impl Engine {
    /// Load persisted state (empty on missing/corrupt snapshot) and start
    /// the view on today's month.
    pub fn new(units: Vec<Unit>, storage: Storage) -> Self {
        let store = BookingStore::from_state(storage.load());
        let (year, month0) = calendar::current_year_month();
        Self {
            units,
            store,
            storage,
            year,
            month0,
            search: String::new(),
            kind_filter: KindFilter::All,
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    pub fn displayed_month(&self) -> (i32, u32) {
        (self.year, self.month0)
    }

    pub fn set_displayed_month(&mut self, year: i32, month0: u32) {
        self.year = year;
        self.month0 = month0;
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn kind_filter(&self) -> KindFilter {
        self.kind_filter
    }

    pub fn set_kind_filter(&mut self, filter: KindFilter) {
        self.kind_filter = filter;
    }

    /// Export the full state plus the displayed month/year.
    /// Returns `(suggested filename, JSON document)`.
    pub fn export_current(&self) -> (String, String) {
        (
            snapshot::export_filename(self.year, self.month0),
            snapshot::export_snapshot(self.store.state(), self.month0, self.year),
        )
    }

    /// Apply an import payload. Malformed JSON leaves everything untouched;
    /// on success `data`, `month`, and `year` each apply independently.
    pub fn import_file(&mut self, raw: &str) -> Result<(), EngineError> {
        let update = snapshot::import_snapshot(raw)?;
        if let Some(month) = update.month {
            self.month0 = month;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(state) = update.data {
            debug!("import: replacing state ({} units)", state.len());
            self.store.replace(state);
            self.commit();
        }
        Ok(())
    }

    /// Write-through commit: persist the full state after a mutation.
    /// A write failure is logged, not propagated — the in-memory state
    /// stays authoritative for the session.
    fn commit(&self) {
        if let Err(e) = self.storage.save(self.store.state()) {
            warn!("{}", EngineError::StorageWrite(e.to_string()));
        }
    }
}
