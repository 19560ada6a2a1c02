//! JSON snapshot persistence.
//!
//! The whole data store lives in one pretty-printed JSON document. Writes go to a
//! sibling temp file first and are renamed into place.

use std::fs;
use std::path::Path;

use timetable_core::calendar::Collections;
use tracing::debug;

use crate::error::{CliError, Result};

/// Loads the snapshot at `path`.
pub fn load_collections(path: &Path) -> Result<Collections> {
    if !path.exists() {
        return Err(CliError::MissingDataFile(path.display().to_string()));
    }

    let raw = fs::read_to_string(path)?;
    let collections: Collections = serde_json::from_str(&raw)?;
    debug!(
        path = %path.display(),
        version = collections.version,
        "loaded timetable snapshot"
    );
    Ok(collections)
}

/// Writes `collections` to `path`, replacing any previous snapshot.
pub fn save_collections(path: &Path, collections: &Collections) -> Result<()> {
    let json = serde_json::to_string_pretty(collections)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    debug!(
        path = %path.display(),
        version = collections.version,
        "saved timetable snapshot"
    );
    Ok(())
}
