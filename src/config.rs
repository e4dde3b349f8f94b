use chrono::{FixedOffset, Offset, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

/// Stream-level configuration consulted on every write call.
///
/// The zone offset is read at format time, not bound into any serializer,
/// so changing it between two writes changes the emitted timestamps
/// without rebuilding the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Offset from UTC, in minutes, applied when rendering date values.
    #[serde(default)]
    utc_offset_minutes: i32,
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_utc_offset_minutes(minutes: i32) -> Self {
        Self {
            utc_offset_minutes: minutes,
        }
    }

    pub fn set_utc_offset_minutes(&mut self, minutes: i32) {
        self.utc_offset_minutes = minutes;
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    /// Fixed offset used for date rendering. An out-of-range offset falls
    /// back to UTC.
    pub fn time_zone(&self) -> FixedOffset {
        match self
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
        {
            Some(zone) => zone,
            None => {
                warn!(
                    "configured UTC offset of {} minutes is out of range, rendering dates in UTC",
                    self.utc_offset_minutes
                );
                Utc.fix()
            }
        }
    }
}
