use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A calendar day rendered as `YYYY-MM-DD`, used verbatim as a map key.
pub type DateKey = String;

/// Occupancy state of one unit on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Empty,
    Reserved,
    Booked,
}

// Unknown status strings collapse to Empty rather than failing the whole
// payload — imported data from older or foreign exports stays readable.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "reserved" => Status::Reserved,
            "booked" => Status::Booked,
            _ => Status::Empty,
        })
    }
}

/// The occupancy record for one unit/day cell.
///
/// Absence of a cell in the store is equivalent to `CellEntry::default()`;
/// callers never observe the difference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub deposit: bool,
}

impl CellEntry {
    pub fn is_vacant(&self) -> bool {
        self.status == Status::Empty && self.name.is_empty() && !self.deposit
    }
}

/// Sparse mapping: unit id → date key → cell entry.
///
/// BTreeMap keeps serialized snapshots deterministic.
pub type BookingState = BTreeMap<String, BTreeMap<DateKey, CellEntry>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Room,
    Studio,
}

/// A rentable unit. The roster is fixed for the lifetime of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: UnitKind,
}

/// Reference roster: `R1..Rn` rooms followed by `S1..Sn` studios.
pub fn default_units(rooms: usize, studios: usize) -> Vec<Unit> {
    let mut units = Vec::with_capacity(rooms + studios);
    for i in 1..=rooms {
        units.push(Unit {
            id: format!("R{i}"),
            label: format!("Room {i}"),
            kind: UnitKind::Room,
        });
    }
    for i in 1..=studios {
        units.push(Unit {
            id: format!("S{i}"),
            label: format!("Studio {i}"),
            kind: UnitKind::Studio,
        });
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_vacant() {
        let cell = CellEntry::default();
        assert_eq!(cell.status, Status::Empty);
        assert_eq!(cell.name, "");
        assert!(!cell.deposit);
        assert!(cell.is_vacant());
    }

    #[test]
    fn deposit_alone_is_not_vacant() {
        let cell = CellEntry {
            deposit: true,
            ..CellEntry::default()
        };
        assert!(!cell.is_vacant());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Reserved).unwrap(), "\"reserved\"");
        assert_eq!(serde_json::to_string(&Status::Booked).unwrap(), "\"booked\"");
        assert_eq!(serde_json::to_string(&Status::Empty).unwrap(), "\"empty\"");
    }

    #[test]
    fn unknown_status_deserializes_to_empty() {
        let cell: CellEntry =
            serde_json::from_str(r#"{"status":"pending","name":"Ana","deposit":true}"#).unwrap();
        assert_eq!(cell.status, Status::Empty);
        assert_eq!(cell.name, "Ana");
        assert!(cell.deposit);
    }

    #[test]
    fn missing_fields_default() {
        let cell: CellEntry = serde_json::from_str(r#"{"status":"booked"}"#).unwrap();
        assert_eq!(cell.status, Status::Booked);
        assert_eq!(cell.name, "");
        assert!(!cell.deposit);
    }

    #[test]
    fn default_units_roster() {
        let units = default_units(12, 4);
        assert_eq!(units.len(), 16);
        assert_eq!(units[0].id, "R1");
        assert_eq!(units[0].kind, UnitKind::Room);
        assert_eq!(units[11].id, "R12");
        assert_eq!(units[12].id, "S1");
        assert_eq!(units[12].kind, UnitKind::Studio);
        assert_eq!(units[15].label, "Studio 4");
    }

    #[test]
    fn unit_kind_serializes_as_type_field() {
        let unit = Unit {
            id: "R1".into(),
            label: "Room 1".into(),
            kind: UnitKind::Room,
        };
        let json = serde_json::to_string(&unit).unwrap();
        assert!(json.contains("\"type\":\"room\""));
    }
}
