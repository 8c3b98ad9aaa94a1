//! On-disk cache of the raw export and the parsed timetable.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{RAW_CACHE_FILE, SNAPSHOT_CACHE_FILE};
use crate::error::{ParseError, TabulaError, TabulaResult};
use crate::timetable::{ScheduledClass, Timetable, WeekSet};

/// Parsed timetable as persisted in `timetable.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub classes: Vec<ScheduledClass>,
    pub weeks: WeekSet,
}

impl Snapshot {
    pub fn new(timetable: &Timetable, weeks: &WeekSet) -> Self {
        Snapshot {
            generated_at: Utc::now(),
            classes: timetable.classes().cloned().collect(),
            weeks: weeks.clone(),
        }
    }

    pub fn timetable(&self) -> Timetable {
        Timetable::from_classes(self.classes.iter().cloned())
    }
}

/// The cache directory and the two files it holds.
#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CacheDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_path(&self) -> PathBuf {
        self.root.join(RAW_CACHE_FILE)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_CACHE_FILE)
    }

    pub fn has_raw(&self) -> bool {
        self.raw_path().is_file()
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot_path().is_file()
    }

    pub fn read_raw(&self) -> TabulaResult<Vec<u8>> {
        Ok(std::fs::read(self.raw_path())?)
    }

    pub fn write_raw(&self, bytes: &[u8]) -> std::io::Result<()> {
        write_atomic(&self.raw_path(), bytes)
    }

    pub fn load_snapshot(&self) -> TabulaResult<Snapshot> {
        let content = std::fs::read_to_string(self.snapshot_path())?;
        serde_json::from_str(&content)
            .map_err(|e| TabulaError::Parse(ParseError::Snapshot(e.to_string())))
    }

    pub fn save_snapshot(&self, snapshot: &Snapshot) -> TabulaResult<()> {
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| TabulaError::Serialization(e.to_string()))?;
        write_atomic(&self.snapshot_path(), content.as_bytes())?;
        Ok(())
    }
}

/// Write through a sibling temp file and rename it into place, so a reader
/// sees either the old file or the complete new one.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}
