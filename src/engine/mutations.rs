use tracing::debug;

use crate::calendar::month_date_keys;
use crate::model::{CellEntry, Status, Unit};

use super::{BookingStore, ClickOutcome, Engine};

/// Tri-state rotation: `empty → reserved → booked → empty`.
/// Anything that is not `reserved` or `booked` rotates as if empty.
pub fn cycle_status(current: Status) -> Status {
    match current {
        Status::Reserved => Status::Booked,
        Status::Booked => Status::Empty,
        _ => Status::Reserved,
    }
}

/// Click transition, pure against the store.
///
/// Cycling back to empty unconditionally clears name and deposit. Cycling
/// away from empty on a nameless cell applies the status change immediately
/// and additionally requests a name-entry prompt; the change is not reverted
/// if the prompt is dismissed ("status first, details later").
pub fn apply_click(store: &mut BookingStore, unit_id: &str, date_key: &str) -> ClickOutcome {
    let current = store.get_or_default(unit_id, date_key);
    let next_status = cycle_status(current.status);

    let (entry, name_entry_requested) = if next_status == Status::Empty {
        (CellEntry::default(), false)
    } else {
        let prompt = current.name.is_empty();
        (
            CellEntry {
                status: next_status,
                name: current.name,
                deposit: current.deposit,
            },
            prompt,
        )
    };

    store.set(unit_id, date_key, entry.clone());
    ClickOutcome {
        entry,
        name_entry_requested,
    }
}

/// Name-entry save callback: write name and deposit, preserving whatever
/// status is currently stored.
pub fn apply_save_name(
    store: &mut BookingStore,
    unit_id: &str,
    date_key: &str,
    name: &str,
    deposit: bool,
) -> CellEntry {
    let current = store.get_or_default(unit_id, date_key);
    let entry = CellEntry {
        status: current.status,
        name: name.to_string(),
        deposit,
    };
    store.set(unit_id, date_key, entry.clone());
    entry
}

/// Independent deposit flip — decoupled from status transitions, so an
/// otherwise-empty cell can carry `deposit: true`.
pub fn apply_toggle_deposit(store: &mut BookingStore, unit_id: &str, date_key: &str) -> CellEntry {
    let mut entry = store.get_or_default(unit_id, date_key);
    entry.deposit = !entry.deposit;
    store.set(unit_id, date_key, entry.clone());
    entry
}

/// Delete every cell of `(year, month0)` for every unit in the canonical
/// roster. Entries in other months are untouched.
pub fn apply_clear_month(store: &mut BookingStore, units: &[Unit], year: i32, month0: u32) {
    let keys = month_date_keys(year, month0);
    for unit in units {
        for key in &keys {
            store.remove(&unit.id, key);
        }
    }
}

impl Engine {
    /// Cycle the cell's status and commit.
    pub fn click_cell(&mut self, unit_id: &str, date_key: &str) -> ClickOutcome {
        let outcome = apply_click(&mut self.store, unit_id, date_key);
        debug!(
            "click {unit_id} {date_key} -> {:?} (prompt: {})",
            outcome.entry.status, outcome.name_entry_requested
        );
        self.commit();
        outcome
    }

    /// Save callback for the UI's name-entry prompt.
    pub fn save_name(&mut self, unit_id: &str, date_key: &str, name: &str, deposit: bool) -> CellEntry {
        let entry = apply_save_name(&mut self.store, unit_id, date_key, name, deposit);
        self.commit();
        entry
    }

    /// Flip the deposit flag on a cell and commit.
    pub fn toggle_deposit(&mut self, unit_id: &str, date_key: &str) -> CellEntry {
        let entry = apply_toggle_deposit(&mut self.store, unit_id, date_key);
        self.commit();
        entry
    }

    /// Bulk-clear the displayed month for the full roster, independent of
    /// any active search filter.
    pub fn clear_current_month(&mut self) {
        let (year, month0) = self.displayed_month();
        apply_clear_month(&mut self.store, &self.units, year, month0);
        debug!("cleared {year}-{:02}", u64::from(month0) + 1);
        self.commit();
    }
}
