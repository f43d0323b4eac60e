//! The layout-directed marshal / unmarshal engine.
//!
//! Given an instant and a [`Layout`], [`marshal`] picks the wire form and
//! [`unmarshal`] reads it back. Both are pure: the caller decides whether and
//! when to commit a decoded instant.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};

use crate::calendar;
use crate::epoch;
use crate::error::{TokiError, TokiResult};
use crate::layout::{EpochUnit, Layout};

/// JSON's literal null, which every unmarshal accepts as a no-op.
pub const JSON_NULL: &[u8] = b"null";

/// Whether bytes travel as plain text or as a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Bare text.
    Text,
    /// A JSON value; string forms are quoted.
    Json,
}

impl Encoding {
    fn quote(self, text: String) -> Vec<u8> {
        match self {
            Encoding::Text => text.into_bytes(),
            Encoding::Json => {
                let mut out = Vec::with_capacity(text.len() + 2);
                out.push(b'"');
                out.extend_from_slice(text.as_bytes());
                out.push(b'"');
                out
            }
        }
    }

    fn unquote(self, data: &[u8]) -> TokiResult<Cow<'_, str>> {
        let inner = match self {
            Encoding::Text => data,
            Encoding::Json => match data {
                [b'"', inner @ .., b'"'] => inner,
                _ => return Err(TokiError::NotAJsonString),
            },
        };
        Ok(String::from_utf8_lossy(inner))
    }
}

/// Project `t` into the wire form `layout` selects.
///
/// The epoch layouts always produce the 8-byte big-endian image, on the JSON
/// path as well as the text path.
pub fn marshal(
    t: &DateTime<FixedOffset>,
    layout: &Layout,
    encoding: Encoding,
) -> TokiResult<Vec<u8>> {
    tracing::trace!(%layout, ?encoding, "marshal");
    match layout {
        Layout::Rfc3339 => {
            let text = calendar::format_rfc3339(t).map_err(TokiError::DelegatedFormat)?;
            Ok(encoding.quote(text))
        }
        Layout::Timestamp => Ok(epoch::encode_image(t, EpochUnit::Seconds).to_vec()),
        Layout::TimestampMilli => Ok(epoch::encode_image(t, EpochUnit::Millis).to_vec()),
        Layout::TimestampNano => Ok(epoch::encode_image(t, EpochUnit::Nanos).to_vec()),
        Layout::Pattern(pattern) => {
            let text = calendar::format_pattern(t, pattern).map_err(TokiError::DelegatedFormat)?;
            Ok(encoding.quote(text))
        }
    }
}

/// Decode `data` according to `layout`.
///
/// Returns `Ok(None)` for JSON `null`, meaning the receiver must be left
/// alone. Epoch integers are placed in `offset`; RFC3339 keeps the offset it
/// was written with and a zone-less pattern yields UTC.
pub fn unmarshal(
    data: &[u8],
    layout: &Layout,
    encoding: Encoding,
    offset: FixedOffset,
) -> TokiResult<Option<DateTime<FixedOffset>>> {
    if encoding == Encoding::Json && data == JSON_NULL {
        return Ok(None);
    }
    tracing::trace!(%layout, ?encoding, len = data.len(), "unmarshal");
    let t = match layout {
        Layout::Rfc3339 => unmarshal_rfc3339(data, encoding)?,
        Layout::Timestamp => epoch::decode_decimal(data, EpochUnit::Seconds, offset)?,
        Layout::TimestampMilli => epoch::decode_decimal(data, EpochUnit::Millis, offset)?,
        Layout::TimestampNano => epoch::decode_decimal(data, EpochUnit::Nanos, offset)?,
        Layout::Pattern(pattern) => unmarshal_pattern(data, pattern, encoding)?,
    };
    Ok(Some(t))
}

fn unmarshal_rfc3339(data: &[u8], encoding: Encoding) -> TokiResult<DateTime<FixedOffset>> {
    let text = encoding.unquote(data)?;
    calendar::parse_rfc3339(&text).map_err(TokiError::DelegatedParse)
}

// A value that does not match the pattern is still accepted when it reads as
// RFC3339, so data written before a layout change keeps decoding.
fn unmarshal_pattern(
    data: &[u8],
    pattern: &str,
    encoding: Encoding,
) -> TokiResult<DateTime<FixedOffset>> {
    let text = encoding.unquote(data)?;
    match calendar::parse_pattern(pattern, &text) {
        Ok(t) => Ok(t),
        Err(err) => match unmarshal_rfc3339(data, encoding) {
            Ok(t) => {
                tracing::debug!(pattern, %err, "pattern parse failed, accepted as RFC3339");
                Ok(t)
            }
            Err(_) => Err(TokiError::DelegatedParse(err)),
        },
    }
}
