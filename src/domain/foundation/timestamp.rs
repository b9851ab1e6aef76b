//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wall-clock time of day in the local zone, e.g. `14:03:27`.
    pub fn local_time_of_day(&self) -> String {
        self.0.with_timezone(&Local).format("%H:%M:%S").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
