//! Codec for the three epoch-integer layouts.
//!
//! The two directions deliberately speak different formats: an instant is
//! written out as an 8-byte big-endian binary image, while input is read as
//! ASCII decimal digits. Writing an image and reading it back is therefore
//! not a round trip; only decimal text converts back into an instant.

use chrono::{DateTime, FixedOffset};

use crate::calendar;
use crate::error::{TokiError, TokiResult};
use crate::layout::EpochUnit;

/// Size of the binary image in bytes.
pub const IMAGE_LEN: usize = 8;

/// Count of `unit`s between the Unix epoch and `t`.
pub fn to_epoch(t: &DateTime<FixedOffset>, unit: EpochUnit) -> i64 {
    match unit {
        EpochUnit::Seconds => calendar::to_epoch_seconds(t),
        EpochUnit::Millis => calendar::to_epoch_millis(t),
        EpochUnit::Nanos => calendar::to_epoch_nanos(t),
    }
}

/// The instant `count` `unit`s after the Unix epoch, viewed from `offset`.
pub fn from_epoch(
    count: i64,
    unit: EpochUnit,
    offset: FixedOffset,
) -> TokiResult<DateTime<FixedOffset>> {
    let t = match unit {
        EpochUnit::Seconds => calendar::from_epoch_seconds(count, offset),
        EpochUnit::Millis => calendar::from_epoch_millis(count, offset),
        EpochUnit::Nanos => Ok(calendar::from_epoch_nanos(count, offset)),
    };
    t.map_err(TokiError::DelegatedParse)
}

/// Big-endian two's-complement image of `t` as a count of `unit`s.
pub fn encode_image(t: &DateTime<FixedOffset>, unit: EpochUnit) -> [u8; IMAGE_LEN] {
    to_epoch(t, unit).to_be_bytes()
}

/// Read back an 8-byte image. Not used by unmarshal, which expects decimal
/// text; handy for consumers holding the raw bytes from marshal.
pub fn decode_image(image: [u8; IMAGE_LEN]) -> i64 {
    i64::from_be_bytes(image)
}

/// Parse ASCII decimal digits with an optional leading `-`.
pub fn parse_decimal(data: &[u8]) -> TokiResult<i64> {
    // Invalid UTF-8 must still fail as a malformed integer, so let the integer
    // parser see the lossy text.
    let text = String::from_utf8_lossy(data);
    text.parse::<i64>()
        .map_err(|source| TokiError::malformed(data, source))
}

/// Parse decimal text and convert it into an instant.
pub fn decode_decimal(
    data: &[u8],
    unit: EpochUnit,
    offset: FixedOffset,
) -> TokiResult<DateTime<FixedOffset>> {
    let count = parse_decimal(data)?;
    tracing::trace!(count, ?unit, "decoded epoch integer");
    from_epoch(count, unit, offset)
}
