use std::{env, path::PathBuf, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON snapshot file (default: "timetable.json")
    pub data_path: PathBuf,
    /// Maximum number of memoized block sets (default: 16)
    pub cache_max_entries: usize,
    /// Delay before the week view scrolls, in milliseconds (default: 100)
    pub scroll_settle_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TIMETABLE_DATA` - JSON snapshot path (default: "timetable.json")
    /// - `MATERIALIZE_CACHE_ENTRIES` - Memoized block sets (default: 16)
    /// - `SCROLL_SETTLE_MS` - Deferred scroll delay in milliseconds (default: 100)
    pub fn from_env() -> Self {
        Self {
            data_path: env::var("TIMETABLE_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("timetable.json")),
            cache_max_entries: env::var("MATERIALIZE_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16),
            scroll_settle_ms: env::var("SCROLL_SETTLE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }

    /// Get the scroll settle delay as a Duration.
    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
