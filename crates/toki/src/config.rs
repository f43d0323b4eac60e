//! Defaults applied when building new values.
//!
//! The zone new values are viewed from is configuration handed to the
//! constructors here, never process-wide state, so tests running in parallel
//! can each pick their own zone.
//!
//! ```rust
//! use toki::TokiConfig;
//!
//! let json = r#"{ "default_layout": "timestamp_milli", "default_offset_secs": -28800 }"#;
//! let config: TokiConfig = serde_json::from_str(json).unwrap();
//! let t = config.from_unix(851_042_397, 0).unwrap();
//! assert_eq!(t.format("%H:%M").unwrap(), "16:39");
//! ```

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::CalendarResult;
use crate::layout::{resolve_layout, Layout, RFC3339};
use crate::toki::Toki;

/// Layout and zone given to every value built through this config.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokiConfig {
    /// Layout tag or strftime pattern. Empty means RFC3339.
    pub default_layout: String,

    /// Seconds east of UTC. Must be strictly within one day.
    pub default_offset_secs: i32,
}

impl Default for TokiConfig {
    fn default() -> Self {
        Self {
            default_layout: RFC3339.to_string(),
            default_offset_secs: 0,
        }
    }
}

impl TokiConfig {
    /// Default layout viewed from a fixed zone.
    pub fn with_offset(offset_secs: i32) -> Self {
        Self {
            default_offset_secs: offset_secs,
            ..Default::default()
        }
    }

    /// US Pacific standard time, for tests that need a non-UTC zone.
    pub fn us_pacific_for_testing() -> Self {
        Self::with_offset(-8 * 3600)
    }

    pub fn layout(&self) -> Layout {
        resolve_layout(Some(&self.default_layout))
    }

    /// The configured zone, rejecting offsets of a day or more.
    pub fn zone(&self) -> CalendarResult<FixedOffset> {
        calendar::zone(self.default_offset_secs)
    }

    /// The Unix epoch in the configured zone and layout.
    pub fn zero(&self) -> CalendarResult<Toki> {
        Ok(self.build(calendar::from_epoch_nanos(0, self.zone()?)))
    }

    pub fn now(&self) -> CalendarResult<Toki> {
        Ok(self.build(calendar::now(self.zone()?)))
    }

    pub fn from_unix(&self, secs: i64, nsecs: i64) -> CalendarResult<Toki> {
        Ok(self.build(calendar::from_unix(secs, nsecs, self.zone()?)?))
    }

    pub fn from_unix_milli(&self, millis: i64) -> CalendarResult<Toki> {
        Ok(self.build(calendar::from_epoch_millis(millis, self.zone()?)?))
    }

    pub fn from_unix_micro(&self, micros: i64) -> CalendarResult<Toki> {
        Ok(self.build(calendar::from_epoch_micros(micros, self.zone()?)?))
    }

    pub fn from_unix_nano(&self, nanos: i64) -> CalendarResult<Toki> {
        Ok(self.build(calendar::from_epoch_nanos(nanos, self.zone()?)))
    }

    /// Calendar fields read as wall time in the configured zone.
    #[allow(clippy::too_many_arguments)]
    pub fn from_calendar(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
        nano: u32,
    ) -> CalendarResult<Toki> {
        let zone = self.zone()?;
        Ok(self.build(calendar::from_calendar(
            year, month, day, hour, min, sec, nano, zone,
        )?))
    }

    fn build(&self, time: chrono::DateTime<FixedOffset>) -> Toki {
        Toki::from_parts(time, self.layout())
    }
}
