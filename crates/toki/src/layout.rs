//! The layout selector deciding which wire form a value uses.

use std::fmt;
use std::str::FromStr;

/// Tag of the RFC3339 layout.
pub const RFC3339: &str = "RFC3339";
/// Tag of the Unix-seconds layout.
pub const LAYOUT_TIMESTAMP: &str = "timestamp";
/// Tag of the Unix-milliseconds layout.
pub const LAYOUT_TIMESTAMP_MILLI: &str = "timestamp_milli";
/// Tag of the Unix-nanoseconds layout.
pub const LAYOUT_TIMESTAMP_NANO: &str = "timestamp_nano";

/// Unit of one of the fixed-width epoch layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpochUnit {
    /// Whole seconds since the Unix epoch.
    Seconds,
    /// Milliseconds since the Unix epoch.
    Millis,
    /// Nanoseconds since the Unix epoch.
    Nanos,
}

/// Selects the textual or binary projection of an instant.
///
/// A layout never changes the stored instant; it only governs how the
/// instant is written out and read back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// RFC3339 text with nanosecond precision.
    #[default]
    Rfc3339,
    /// 64-bit Unix seconds.
    Timestamp,
    /// 64-bit Unix milliseconds.
    TimestampMilli,
    /// 64-bit Unix nanoseconds.
    TimestampNano,
    /// Caller-supplied strftime pattern, e.g. `%Y-%m-%d`.
    Pattern(String),
}

impl Layout {
    /// The epoch unit of this layout, if it is one of the integer layouts.
    pub fn epoch_unit(&self) -> Option<EpochUnit> {
        match self {
            Layout::Timestamp => Some(EpochUnit::Seconds),
            Layout::TimestampMilli => Some(EpochUnit::Millis),
            Layout::TimestampNano => Some(EpochUnit::Nanos),
            Layout::Rfc3339 | Layout::Pattern(_) => None,
        }
    }

    /// The string tag naming this layout.
    pub fn as_str(&self) -> &str {
        match self {
            Layout::Rfc3339 => RFC3339,
            Layout::Timestamp => LAYOUT_TIMESTAMP,
            Layout::TimestampMilli => LAYOUT_TIMESTAMP_MILLI,
            Layout::TimestampNano => LAYOUT_TIMESTAMP_NANO,
            Layout::Pattern(p) => p,
        }
    }
}

impl From<EpochUnit> for Layout {
    fn from(unit: EpochUnit) -> Self {
        match unit {
            EpochUnit::Seconds => Layout::Timestamp,
            EpochUnit::Millis => Layout::TimestampMilli,
            EpochUnit::Nanos => Layout::TimestampNano,
        }
    }
}

impl From<&str> for Layout {
    fn from(s: &str) -> Self {
        match s {
            "" | RFC3339 => Layout::Rfc3339,
            LAYOUT_TIMESTAMP => Layout::Timestamp,
            LAYOUT_TIMESTAMP_MILLI => Layout::TimestampMilli,
            LAYOUT_TIMESTAMP_NANO => Layout::TimestampNano,
            pattern => Layout::Pattern(pattern.to_string()),
        }
    }
}

impl From<String> for Layout {
    fn from(s: String) -> Self {
        Layout::from(s.as_str())
    }
}

impl FromStr for Layout {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the explicit layout when one is given and non-empty, else RFC3339.
pub fn resolve_layout(explicit: Option<&str>) -> Layout {
    explicit.map(Layout::from).unwrap_or_default()
}
