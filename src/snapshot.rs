use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::engine::EngineError;
use crate::model::BookingState;

pub const SNAPSHOT_VERSION: u32 = 2;
const PRODUCT_SLUG: &str = "roomboard";

#[derive(Serialize)]
struct Snapshot<'a> {
    version: u32,
    month: u32,
    year: i32,
    data: &'a BookingState,
}

/// Fields an import payload carries. Each applies independently — a payload
/// can update only the displayed month, or only the data, or any mix.
#[derive(Debug, Default, PartialEq)]
pub struct ImportUpdate {
    pub data: Option<BookingState>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Serialize the full state plus displayed month/year as a portable
/// JSON document. `month` is zero-based.
pub fn export_snapshot(state: &BookingState, month0: u32, year: i32) -> String {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        month: month0,
        year,
        data: state,
    };
    serde_json::to_string_pretty(&snapshot).expect("snapshot serialization is infallible")
}

/// `roomboard_<year>-<MM>.json`, MM one-based and zero-padded.
/// Widened add: a caller-supplied month past 11 must not overflow.
pub fn export_filename(year: i32, month0: u32) -> String {
    format!("{PRODUCT_SLUG}_{year}-{:02}.json", u64::from(month0) + 1)
}

/// Parse an import payload.
///
/// Malformed JSON (or a non-object top level) is an error and the caller
/// must leave all state untouched. On success each recognized field is
/// validated independently; fields that are absent or of the wrong shape
/// are skipped, not fatal. The `version` field is ignored.
pub fn import_snapshot(raw: &str) -> Result<ImportUpdate, EngineError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| EngineError::ImportParse(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(EngineError::ImportParse("expected a JSON object".into()));
    };

    let mut update = ImportUpdate::default();

    if let Some(data) = fields.get("data") {
        match serde_json::from_value::<BookingState>(data.clone()) {
            Ok(state) => update.data = Some(state),
            Err(e) => debug!("import: skipping malformed data field: {e}"),
        }
    }
    if let Some(month) = fields.get("month").and_then(Value::as_u64) {
        // Schema check: the displayed month lives in 0..=11. Anything else
        // is skipped like any other malformed field, never applied.
        update.month = u32::try_from(month).ok().filter(|m| *m <= 11);
    }
    if let Some(year) = fields.get("year").and_then(Value::as_i64) {
        update.year = i32::try_from(year).ok();
    }

    Ok(update)
}
