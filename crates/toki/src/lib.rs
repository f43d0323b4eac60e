#![deny(missing_docs)]
//! A date/time value that carries its own serialization layout.
//!
//! [`Toki`] pairs a `chrono::DateTime<FixedOffset>` with a [`Layout`], so the
//! same value can be written out as RFC3339 text, as a Unix seconds /
//! milliseconds / nanoseconds integer, or through an arbitrary strftime
//! pattern, with the choice made per value rather than per conversion helper.
//! [`Timestamp`], [`TimestampMillis`] and [`TimestampNanos`] pin the layout to
//! one epoch unit.
//!
//! ```rust
//! use toki::{Marshaler, Toki};
//!
//! let mut t = Toki::new("timestamp");
//! t.unmarshal_json(b"851042397").unwrap();
//! assert_eq!(t.unix(), 851_042_397);
//!
//! // the epoch layouts marshal to the big-endian image, not to decimal text
//! assert_eq!(t.marshal_json().unwrap(), 851_042_397_i64.to_be_bytes().to_vec());
//!
//! let t = t.with_layout("RFC3339");
//! assert_eq!(t.marshal_json().unwrap(), b"\"1996-12-20T00:39:57Z\"".to_vec());
//! ```
//!
//! Calendar arithmetic, zones and field access are left to `chrono`; reach
//! the underlying instant through [`Toki::to_date_time`].

#[allow(missing_docs)]
pub mod calendar;
pub mod codec;
#[allow(missing_docs)]
mod config;
pub mod epoch;
#[allow(missing_docs)]
mod error;
pub mod layout;
mod serde_impls;
#[allow(missing_docs)]
mod timestamp;
#[allow(missing_docs)]
mod toki;

pub use crate::config::TokiConfig;
pub use crate::error::{CalendarError, CalendarResult, TokiError, TokiResult};
pub use crate::layout::{resolve_layout, EpochUnit, Layout};
pub use crate::timestamp::{Timestamp, TimestampMillis, TimestampNanos};
pub use crate::toki::Toki;

/// Byte-level marshaling, shared by [`Toki`] and the fixed-layout types.
///
/// Unmarshaling writes into the receiver only on success; JSON `null` is
/// accepted and leaves the receiver untouched.
pub trait Marshaler {
    /// Encode for a plain-text context.
    fn marshal_text(&self) -> TokiResult<Vec<u8>>;

    /// Encode as a JSON value.
    fn marshal_json(&self) -> TokiResult<Vec<u8>>;

    /// Decode from plain text, replacing the receiver's instant.
    fn unmarshal_text(&mut self, data: &[u8]) -> TokiResult<()>;

    /// Decode from a JSON value, replacing the receiver's instant.
    fn unmarshal_json(&mut self, data: &[u8]) -> TokiResult<()>;
}
