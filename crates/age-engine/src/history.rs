//! Bounded history of past calculations.
//!
//! The log is a JSON array in a single storage slot, newest entry first,
//! holding at most [`HISTORY_LIMIT`] entries:
//!
//! ```json
//! [{"dob":"2000-02-29","tob":"06:30","summary":"DOB: ...","ts":1740830400000}]
//! ```
//!
//! History is best-effort. A missing or unparseable slot reads as an empty
//! log, and failed writes are logged and dropped; neither ever reaches the
//! caller as an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::age::AgeBreakdown;
use crate::storage::Storage;

/// Storage slot holding the log.
pub const HISTORY_KEY: &str = "age_history";

/// Maximum number of entries kept.
pub const HISTORY_LIMIT: usize = 10;

/// One past calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Date of birth exactly as entered.
    pub dob: String,
    /// Time of birth exactly as entered; empty when none was given.
    #[serde(default)]
    pub tob: String,
    /// Summary line produced by the calculation.
    pub summary: String,
    /// When the calculation ran, in milliseconds since the Unix epoch.
    pub ts: i64,
}

impl HistoryEntry {
    pub fn new(
        dob: impl Into<String>,
        tob: impl Into<String>,
        summary: impl Into<String>,
        ts: i64,
    ) -> Self {
        Self {
            dob: dob.into(),
            tob: tob.into(),
            summary: summary.into(),
            ts,
        }
    }

    /// Record a finished calculation. A missing `tob` is stored as "".
    pub fn from_breakdown(dob: &str, tob: Option<&str>, age: &AgeBreakdown, ts: i64) -> Self {
        Self::new(dob, tob.unwrap_or_default(), age.summary.clone(), ts)
    }
}

/// Newest-first list of entries.
pub type HistoryLog = Vec<HistoryEntry>;

/// Reads and writes the history log through a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct HistoryStore<S> {
    storage: S,
}

impl<S: Storage> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The current log; empty if nothing is stored or the stored value is corrupt.
    pub fn read(&self) -> HistoryLog {
        let raw = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read history: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring corrupt history: {}", e);
            Vec::new()
        })
    }

    /// Prepend `entry`, keep the newest [`HISTORY_LIMIT`] entries and write
    /// them back. Returns the capped log even if the write failed.
    pub fn append(&self, entry: HistoryEntry) -> HistoryLog {
        let mut log = self.read();
        log.insert(0, entry);
        log.truncate(HISTORY_LIMIT);

        let written = serde_json::to_string(&log)
            .map_err(std::io::Error::from)
            .and_then(|json| self.storage.set(HISTORY_KEY, &json));
        match written {
            Ok(()) => debug!("Saved history ({} entries)", log.len()),
            Err(e) => warn!("History not saved: {}", e),
        }

        log
    }

    /// Remove the stored log entirely.
    pub fn clear(&self) {
        match self.storage.remove(HISTORY_KEY) {
            Ok(()) => debug!("Cleared history"),
            Err(e) => warn!("Could not clear history: {}", e),
        }
    }
}
