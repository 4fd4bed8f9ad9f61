//! Per-run context.
//!
//! A single timestamp is computed once when a research run starts and is
//! threaded explicitly into every agent step and derived file path. Agents
//! are instructed to save under `workspace/{timestamp}/`, so a consistent
//! value across the whole run is what keeps their file-naming decisions
//! coherent.

use chrono::{FixedOffset, Utc};

/// Timestamps use Korean Standard Time (UTC+9).
const KST_OFFSET_SECONDS: i32 = 9 * 3600;

/// Read-only context shared by every step of one research run.
///
/// Constructed once per process invocation, before any agent runs, and
/// passed by reference - never recomputed, never a global.
#[derive(Debug, Clone)]
pub struct RunContext {
    timestamp: String,
}

impl RunContext {
    /// Create a context stamped with the current KST time.
    pub fn new() -> Self {
        let kst = FixedOffset::east_opt(KST_OFFSET_SECONDS).expect("valid fixed offset");
        let now = Utc::now().with_timezone(&kst);
        Self {
            timestamp: now.format("%Y-%m-%d_%H-%M").to_string(),
        }
    }

    /// Create a context with a fixed timestamp (used by tests and replays).
    pub fn with_timestamp(timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
        }
    }

    /// The run timestamp, e.g. `2026-08-27_14-30`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
