use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::calendar;
use crate::codec::{self, Encoding};
use crate::error::{CalendarResult, TokiResult};
use crate::layout::Layout;
use crate::Marshaler;

/// A calendar instant paired with the layout it is marshaled with.
///
/// The instant is a `chrono::DateTime<FixedOffset>` held by value; the layout
/// only decides how the instant is projected onto text, JSON or an epoch
/// integer image, and never alters the instant itself.
///
/// Equality and ordering compare absolute instants: two values naming the
/// same moment from different offsets, or with different layouts, are equal.
/// Use [`Toki::equal_time_and_zone`] to also compare offsets.
#[derive(Clone)]
pub struct Toki {
    layout: Layout,
    time: DateTime<FixedOffset>,
}

impl Default for Toki {
    fn default() -> Self {
        Self::new(Layout::Rfc3339)
    }
}

impl Toki {
    /// The Unix epoch in UTC, marshaled with `layout`.
    pub fn new(layout: impl Into<Layout>) -> Self {
        Self::from_parts(calendar::from_epoch_nanos(0, calendar::utc()), layout)
    }

    pub fn from_parts(time: DateTime<FixedOffset>, layout: impl Into<Layout>) -> Self {
        Self {
            layout: layout.into(),
            time,
        }
    }

    /// The current time in UTC.
    pub fn now() -> Self {
        Self::now_in(calendar::utc())
    }

    /// The current time viewed from `offset`.
    pub fn now_in(offset: FixedOffset) -> Self {
        calendar::now(offset).into()
    }

    /// `secs` seconds plus `nsecs` nanoseconds after the Unix epoch, in UTC.
    /// `nsecs` may lie outside `[0, 1e9)`.
    pub fn from_unix(secs: i64, nsecs: i64) -> CalendarResult<Self> {
        Ok(calendar::from_unix(secs, nsecs, calendar::utc())?.into())
    }

    pub fn from_unix_milli(millis: i64) -> CalendarResult<Self> {
        Ok(calendar::from_epoch_millis(millis, calendar::utc())?.into())
    }

    pub fn from_unix_micro(micros: i64) -> CalendarResult<Self> {
        Ok(calendar::from_epoch_micros(micros, calendar::utc())?.into())
    }

    pub fn from_unix_nano(nanos: i64) -> Self {
        calendar::from_epoch_nanos(nanos, calendar::utc()).into()
    }

    /// Build from calendar fields; fields out of their natural range are
    /// rejected rather than normalized.
    #[allow(clippy::too_many_arguments)]
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
        nano: u32,
        offset: FixedOffset,
    ) -> CalendarResult<Self> {
        Ok(calendar::from_calendar(year, month, day, hour, min, sec, nano, offset)?.into())
    }

    /// Parse `text` with a strftime `pattern`. The result marshals as RFC3339
    /// until given another layout.
    pub fn parse(pattern: &str, text: &str) -> CalendarResult<Self> {
        Ok(calendar::parse_pattern(pattern, text)?.into())
    }

    pub fn with_layout(mut self, layout: impl Into<Layout>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: impl Into<Layout>) {
        self.layout = layout.into();
    }

    /// The underlying calendar instant, for anything this type does not
    /// forward.
    pub fn to_date_time(&self) -> DateTime<FixedOffset> {
        self.time
    }

    pub fn offset(&self) -> FixedOffset {
        *self.time.offset()
    }

    /// The same instant viewed from another offset.
    pub fn with_offset(&self, offset: FixedOffset) -> Self {
        Self::from_parts(self.time.with_timezone(&offset), self.layout.clone())
    }

    pub fn to_utc(&self) -> Self {
        self.with_offset(calendar::utc())
    }

    pub fn unix(&self) -> i64 {
        calendar::to_epoch_seconds(&self.time)
    }

    pub fn unix_milli(&self) -> i64 {
        calendar::to_epoch_millis(&self.time)
    }

    /// Wraps for instants whose microsecond count exceeds an `i64`.
    pub fn unix_micro(&self) -> i64 {
        calendar::to_epoch_micros(&self.time)
    }

    /// Wraps for instants outside roughly 1677..2262 CE.
    pub fn unix_nano(&self) -> i64 {
        calendar::to_epoch_nanos(&self.time)
    }

    /// Render with a strftime pattern, independently of the layout.
    pub fn format(&self, pattern: &str) -> CalendarResult<String> {
        calendar::format_pattern(&self.time, pattern)
    }

    pub fn equal(&self, other: &Toki) -> bool {
        self.time == other.time
    }

    /// Same instant and same offset.
    pub fn equal_time_and_zone(&self, other: &Toki) -> bool {
        self.equal(other) && self.offset() == other.offset()
    }

    pub fn before(&self, other: &Toki) -> bool {
        self.time < other.time
    }

    pub fn after(&self, other: &Toki) -> bool {
        self.time > other.time
    }

    fn unmarshal(&mut self, data: &[u8], encoding: Encoding) -> TokiResult<()> {
        if let Some(time) = codec::unmarshal(data, &self.layout, encoding, self.offset())? {
            self.time = time;
        }
        Ok(())
    }
}

impl Marshaler for Toki {
    fn marshal_text(&self) -> TokiResult<Vec<u8>> {
        codec::marshal(&self.time, &self.layout, Encoding::Text)
    }

    fn marshal_json(&self) -> TokiResult<Vec<u8>> {
        codec::marshal(&self.time, &self.layout, Encoding::Json)
    }

    fn unmarshal_text(&mut self, data: &[u8]) -> TokiResult<()> {
        self.unmarshal(data, Encoding::Text)
    }

    fn unmarshal_json(&mut self, data: &[u8]) -> TokiResult<()> {
        self.unmarshal(data, Encoding::Json)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Toki {
    fn from(t: DateTime<Tz>) -> Self {
        Self::from_parts(t.fixed_offset(), Layout::Rfc3339)
    }
}

impl From<Toki> for DateTime<FixedOffset> {
    fn from(t: Toki) -> Self {
        t.time
    }
}

impl PartialEq for Toki {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Toki {}

impl PartialOrd for Toki {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Toki {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time.cmp(&other.time)
    }
}

impl fmt::Display for Toki {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.time, f)
    }
}

impl fmt::Debug for Toki {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Toki({}, {})", self.time, self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalendarError, TokiError};
    use matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn pacific() -> FixedOffset {
        calendar::zone(-8 * 3600).unwrap()
    }

    #[test]
    fn default_is_the_epoch_as_rfc3339() {
        let t = Toki::default();
        assert_eq!(t.unix_nano(), 0);
        assert_eq!(t.layout(), &Layout::Rfc3339);
        assert_eq!(
            t.marshal_json().unwrap(),
            b"\"1970-01-01T00:00:00Z\"".to_vec()
        );
    }

    #[test]
    fn layout_does_not_touch_the_instant() {
        let t = Toki::from_unix(851_042_397, 123_456_789).unwrap();
        let relaid = t.clone().with_layout("timestamp");
        assert_eq!(relaid.unix_nano(), t.unix_nano());
        assert!(relaid.equal_time_and_zone(&t));
        assert_eq!(
            relaid.marshal_text().unwrap(),
            851_042_397_i64.to_be_bytes().to_vec()
        );
    }

    #[test]
    fn equality_ignores_offset_and_layout() {
        let utc = Toki::from_unix(851_042_397, 0).unwrap();
        let local = utc.with_offset(pacific()).with_layout("timestamp_nano");
        assert_eq!(utc, local);
        assert!(!utc.equal_time_and_zone(&local));
        assert_eq!(local.to_utc().offset(), calendar::utc());
        assert_eq!(local.format("%H:%M").unwrap(), "16:39");
    }

    #[test]
    fn ordering_follows_the_instant() {
        let a = Toki::from_unix_milli(1).unwrap();
        let b = Toki::from_unix_nano(1_000_001);
        assert!(a.before(&b));
        assert!(b.after(&a));
        assert!(a < b);
    }

    #[test]
    fn epoch_accessors() {
        let t = Toki::from_calendar(9999, 4, 12, 23, 20, 50, 520_000_000, calendar::utc()).unwrap();
        assert_eq!(t.unix(), 253_379_575_250);
        assert_eq!(t.unix_milli(), 253_379_575_250_520);
        assert_eq!(t.unix_micro(), 253_379_575_250_520_000);
        assert_eq!(t.unix_nano(), -4_874_841_781_413_722_624);
    }

    #[test]
    fn constructors_report_calendar_errors() {
        assert_eq!(
            Toki::from_unix(i64::MAX, 0).unwrap_err(),
            CalendarError::EpochOutOfRange(i64::MAX)
        );
        assert_matches!(
            Toki::parse("%Y-%m-%d", "2000-13-01"),
            Err(CalendarError::Parse(_))
        );
        assert_eq!(
            Toki::from_calendar(2000, 2, 30, 0, 0, 0, 0, calendar::utc()).unwrap_err(),
            CalendarError::InvalidDate
        );
    }

    #[test]
    fn unmarshal_keeps_the_receiver_zone_for_epochs() {
        let mut t = Toki::now_in(pacific()).with_layout("timestamp");
        t.unmarshal_json(b"851042397").unwrap();
        assert_eq!(t.unix(), 851_042_397);
        assert_eq!(t.offset(), pacific());
        assert_eq!(
            t.format("%Y-%m-%d %H:%M:%S").unwrap(),
            "1996-12-19 16:39:57"
        );
    }

    #[test]
    fn failed_unmarshal_leaves_receiver_alone() {
        let mut t = Toki::from_unix(42, 0).unwrap().with_layout("%d/%m/%Y");
        assert_matches!(
            t.unmarshal_json(b"\"not a date\""),
            Err(TokiError::DelegatedParse(_))
        );
        assert_eq!(t.unix(), 42);

        t.set_layout("timestamp_milli");
        assert_matches!(
            t.unmarshal_text(b"12ab"),
            Err(TokiError::MalformedInteger { .. })
        );
        assert_eq!(t.unix(), 42);
    }

    #[test]
    fn json_null_leaves_receiver_alone() {
        for layout in ["RFC3339", "timestamp", "%Y"] {
            let mut t = Toki::from_unix(42, 7).unwrap().with_layout(layout);
            t.unmarshal_json(b"null").unwrap();
            assert_eq!(t.unix_nano(), 42_000_000_007);
        }
    }
}
