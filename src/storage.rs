use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::BookingState;

/// On-disk snapshot name — the storage-key equivalent of the UI build.
pub const STORAGE_FILE: &str = "booking-data-v2.json";

/// Full-state snapshot persistence.
///
/// Every committed mutation rewrites the whole serialized `BookingState`;
/// there is no delta format. Writes go to a temp file first and are renamed
/// into place so a crash mid-write leaves the previous snapshot intact.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Storage rooted in `data_dir` (created if missing).
    pub fn open(data_dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(STORAGE_FILE),
        })
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored snapshot. A missing or unparsable file falls back to
    /// the empty state — never an error to the caller.
    pub fn load(&self) -> BookingState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BookingState::default(),
            Err(e) => {
                warn!("could not read {}: {e}; starting empty", self.path.display());
                return BookingState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    "corrupt snapshot at {}: {e}; starting empty",
                    self.path.display()
                );
                BookingState::default()
            }
        }
    }

    /// Serialize and persist the full state. Temp file + rename + fsync.
    pub fn save(&self, state: &BookingState) -> io::Result<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        let payload = serde_json::to_vec(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writer.write_all(&payload)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
