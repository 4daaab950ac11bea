use crate::calendar::month_date_keys;
use crate::model::{CellEntry, Unit, UnitKind};

use super::{BookingStore, Engine};

/// Toolbar unit-type filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Rooms,
    Studios,
}

impl KindFilter {
    pub fn matches(self, kind: UnitKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Rooms => kind == UnitKind::Room,
            KindFilter::Studios => kind == UnitKind::Studio,
        }
    }
}

/// Units with at least one occupant name in `(year, month0)` containing
/// `term` as a case-insensitive substring. A term that trims to empty
/// returns the full list in its original order. Recomputed from scratch on
/// every call — no index to maintain.
pub fn filter_units(
    units: &[Unit],
    store: &BookingStore,
    term: &str,
    year: i32,
    month0: u32,
) -> Vec<Unit> {
    if term.trim().is_empty() {
        return units.to_vec();
    }
    // Trimming is only for the emptiness check; matching uses the raw term.
    let needle = term.to_lowercase();
    let keys = month_date_keys(year, month0);
    units
        .iter()
        .filter(|unit| {
            keys.iter()
                .any(|key| store.name_at(&unit.id, key).to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

impl Engine {
    /// Entry for a unit/day, defaulting to the vacant cell. Unknown unit or
    /// day identifiers read as vacant rather than erroring.
    pub fn get_cell(&self, unit_id: &str, date_key: &str) -> CellEntry {
        self.store().get_or_default(unit_id, date_key)
    }

    /// Name-search filter against an explicit term and month.
    pub fn filtered_units_for(&self, term: &str, year: i32, month0: u32) -> Vec<Unit> {
        filter_units(self.units(), self.store(), term, year, month0)
    }

    /// Units to display: the kind filter composed with the current search
    /// term, scoped to the displayed month.
    pub fn filtered_units(&self) -> Vec<Unit> {
        let (year, month0) = self.displayed_month();
        let kind_filter = self.kind_filter();
        self.filtered_units_for(self.search_term(), year, month0)
            .into_iter()
            .filter(|unit| kind_filter.matches(unit.kind))
            .collect()
    }
}
