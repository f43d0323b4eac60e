//! Thin adapter over `chrono`, the calendar facility every instant is
//! delegated to.
//!
//! Nothing in here knows about layouts. The engine in [`crate::codec`] calls
//! these functions and forwards their errors untouched.

use chrono::format::{self, Item, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, TimeZone, Timelike, Utc};
use std::fmt::Write;

use crate::error::{CalendarError, CalendarResult};

/// One billion
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// The zero offset.
pub fn utc() -> FixedOffset {
    Utc.fix()
}

/// A fixed zone `offset_secs` east of UTC.
pub fn zone(offset_secs: i32) -> CalendarResult<FixedOffset> {
    FixedOffset::east_opt(offset_secs).ok_or(CalendarError::InvalidOffset(offset_secs))
}

/// The current system time, viewed from `offset`.
pub fn now(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

/// Seconds plus a nanosecond adjustment, which may lie outside `[0, 1e9)`
/// and is normalized into the seconds.
pub fn from_unix(
    secs: i64,
    nsecs: i64,
    offset: FixedOffset,
) -> CalendarResult<DateTime<FixedOffset>> {
    let secs = secs
        .checked_add(nsecs.div_euclid(NANOS_PER_SEC))
        .ok_or(CalendarError::EpochOutOfRange(secs))?;
    let nsecs = nsecs.rem_euclid(NANOS_PER_SEC) as u32;
    DateTime::from_timestamp(secs, nsecs)
        .map(|t| t.with_timezone(&offset))
        .ok_or(CalendarError::EpochOutOfRange(secs))
}

pub fn from_epoch_seconds(secs: i64, offset: FixedOffset) -> CalendarResult<DateTime<FixedOffset>> {
    from_unix(secs, 0, offset)
}

pub fn from_epoch_millis(
    millis: i64,
    offset: FixedOffset,
) -> CalendarResult<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(millis)
        .map(|t| t.with_timezone(&offset))
        .ok_or(CalendarError::EpochOutOfRange(millis))
}

pub fn from_epoch_micros(
    micros: i64,
    offset: FixedOffset,
) -> CalendarResult<DateTime<FixedOffset>> {
    DateTime::from_timestamp_micros(micros)
        .map(|t| t.with_timezone(&offset))
        .ok_or(CalendarError::EpochOutOfRange(micros))
}

/// Every `i64` nanosecond count is representable, so this never fails.
pub fn from_epoch_nanos(nanos: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::from_timestamp_nanos(nanos).with_timezone(&offset)
}

pub fn to_epoch_seconds(t: &DateTime<FixedOffset>) -> i64 {
    t.timestamp()
}

pub fn to_epoch_millis(t: &DateTime<FixedOffset>) -> i64 {
    t.timestamp() * 1_000 + i64::from(subsec_nanos(t) / 1_000_000)
}

/// Wraps on overflow, like [`to_epoch_nanos`].
pub fn to_epoch_micros(t: &DateTime<FixedOffset>) -> i64 {
    t.timestamp()
        .wrapping_mul(1_000_000)
        .wrapping_add(i64::from(subsec_nanos(t) / 1_000))
}

/// Instants past roughly 2262 CE (or before 1677 CE) do not fit in an `i64`
/// nanosecond count; the result wraps in two's complement rather than
/// failing.
pub fn to_epoch_nanos(t: &DateTime<FixedOffset>) -> i64 {
    t.timestamp()
        .wrapping_mul(NANOS_PER_SEC)
        .wrapping_add(i64::from(subsec_nanos(t)))
}

// chrono encodes a leap second as a nanosecond field >= 1e9. Parsing rejects
// them, but one converted in from a chrono value is folded into second 59.
fn subsec_nanos(t: &DateTime<FixedOffset>) -> u32 {
    t.timestamp_subsec_nanos() % NANOS_PER_SEC as u32
}

/// Build an instant from calendar fields in the given zone. `nano` must stay
/// below one second; chrono's leap-second encoding is refused.
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
) -> CalendarResult<DateTime<FixedOffset>> {
    if sec == 59 && i64::from(nano) >= NANOS_PER_SEC {
        return Err(CalendarError::LeapSecond);
    }
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_nano_opt(hour, min, sec, nano))
        .ok_or(CalendarError::InvalidDate)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or(CalendarError::InvalidDate)
}

/// RFC3339 with nanosecond precision: the fraction is printed without
/// trailing zeros and a zero offset is printed as `Z`.
///
/// Only years `[0, 9999]` and offsets below 24 hours can be written.
pub fn format_rfc3339(t: &DateTime<FixedOffset>) -> CalendarResult<String> {
    if !(0..=9999).contains(&t.year()) {
        return Err(CalendarError::YearOutOfRange);
    }
    let offset = t.offset().local_minus_utc();
    if offset.unsigned_abs() / 3600 > 23 {
        return Err(CalendarError::ZoneHourOutOfRange);
    }

    let mut out = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    );
    let nanos = subsec_nanos(t);
    if nanos != 0 {
        let frac = format!("{:09}", nanos);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    if offset == 0 {
        out.push('Z');
    } else {
        let sign = if offset < 0 { '-' } else { '+' };
        let abs = offset.unsigned_abs();
        out.push_str(&format!("{}{:02}:{:02}", sign, abs / 3600, abs % 3600 / 60));
    }
    Ok(out)
}

/// Leap seconds (`23:59:60`) are rejected.
pub fn parse_rfc3339(text: &str) -> CalendarResult<DateTime<FixedOffset>> {
    reject_leap_second(DateTime::parse_from_rfc3339(text)?)
}

fn pattern_items(pattern: &str) -> CalendarResult<Vec<Item<'_>>> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|i| matches!(i, Item::Error)) {
        return Err(CalendarError::InvalidPattern(pattern.to_string()));
    }
    Ok(items)
}

/// Render `t` with a strftime pattern.
pub fn format_pattern(t: &DateTime<FixedOffset>, pattern: &str) -> CalendarResult<String> {
    let items = pattern_items(pattern)?;
    let mut out = String::new();
    write!(out, "{}", t.format_with_items(items.iter()))
        .map_err(|_| CalendarError::Format(pattern.to_string()))?;
    Ok(out)
}

/// Parse `text` with a strftime pattern.
///
/// Fields the pattern leaves out default to year 0, January, the first of
/// the month and midnight. A pattern carrying no offset yields UTC.
pub fn parse_pattern(pattern: &str, text: &str) -> CalendarResult<DateTime<FixedOffset>> {
    let items = pattern_items(pattern)?;
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, items.iter())?;
    if parsed.timestamp().is_none() {
        fill_missing_fields(&mut parsed)?;
    }
    let t = if parsed.offset().is_some() || parsed.timestamp().is_some() {
        parsed.to_datetime()?
    } else {
        parsed
            .to_naive_datetime_with_offset(0)?
            .and_utc()
            .fixed_offset()
    };
    reject_leap_second(t)
}

fn fill_missing_fields(parsed: &mut Parsed) -> ParseResult<()> {
    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some()
        || parsed.isoyear_div_100().is_some()
        || parsed.isoyear_mod_100().is_some();
    let has_week = parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some()
        || parsed.isoweek().is_some();
    let day_of_year = has_week || parsed.ordinal().is_some();

    if !has_year {
        parsed.set_year(0)?;
    }
    if parsed.month().is_none() && !day_of_year {
        parsed.set_month(1)?;
    }
    if parsed.day().is_none() && !day_of_year {
        parsed.set_day(1)?;
    }
    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        // %I without %p reads as morning
        (None, Some(_)) => parsed.set_ampm(false)?,
        (None, None) => parsed.set_hour(0)?,
        _ => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    Ok(())
}

// chrono accepts second 60; the layouts have no way to write it back
fn reject_leap_second(t: DateTime<FixedOffset>) -> CalendarResult<DateTime<FixedOffset>> {
    if t.timestamp_subsec_nanos() >= NANOS_PER_SEC as u32 {
        return Err(CalendarError::LeapSecond);
    }
    Ok(t)
}
