//! Instants pinned to one of the epoch-integer layouts.
//!
//! `marshal_json` and `marshal_text` emit the 8-byte big-endian image, while
//! `unmarshal_json` and `unmarshal_text` read ASCII decimal digits. A value
//! marshaled by one of these types cannot be fed back into its own unmarshal.
//! Only `unmarshal_json` treats `null` as a no-op.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::calendar;
use crate::codec::{self, Encoding};
use crate::epoch;
use crate::error::{CalendarResult, TokiResult};
use crate::layout::{EpochUnit, Layout};
use crate::toki::Toki;
use crate::Marshaler;

macro_rules! fixed_layout_timestamp {
    ($(#[$meta:meta])* $name:ident, $unit:expr, $layout:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(DateTime<FixedOffset>);

        impl $name {
            /// The epoch unit this type marshals with.
            pub const UNIT: EpochUnit = $unit;

            /// The layout this type marshals with.
            pub fn layout() -> Layout {
                $layout
            }

            /// The current time in UTC.
            pub fn now() -> Self {
                Self(calendar::now(calendar::utc()))
            }

            /// `count` units after the Unix epoch, in UTC.
            pub fn from_epoch(count: i64) -> CalendarResult<Self> {
                Self::from_epoch_in(count, calendar::utc())
            }

            /// `count` units after the Unix epoch, viewed from `offset`.
            pub fn from_epoch_in(count: i64, offset: FixedOffset) -> CalendarResult<Self> {
                let t = match Self::UNIT {
                    EpochUnit::Seconds => calendar::from_epoch_seconds(count, offset)?,
                    EpochUnit::Millis => calendar::from_epoch_millis(count, offset)?,
                    EpochUnit::Nanos => calendar::from_epoch_nanos(count, offset),
                };
                Ok(Self(t))
            }

            /// Count of units since the Unix epoch.
            pub fn as_epoch(&self) -> i64 {
                epoch::to_epoch(&self.0, Self::UNIT)
            }

            pub fn to_date_time(&self) -> DateTime<FixedOffset> {
                self.0
            }

            /// The same instant as a [`Toki`] carrying this type's layout.
            pub fn into_toki(self) -> Toki {
                Toki::from_parts(self.0, Self::layout())
            }

            fn unmarshal(&mut self, data: &[u8], encoding: Encoding) -> TokiResult<()> {
                let offset = *self.0.offset();
                if let Some(t) = codec::unmarshal(data, &Self::layout(), encoding, offset)? {
                    self.0 = t;
                }
                Ok(())
            }
        }

        impl Default for $name {
            /// The Unix epoch.
            fn default() -> Self {
                Self(calendar::from_epoch_nanos(0, calendar::utc()))
            }
        }

        impl Marshaler for $name {
            fn marshal_text(&self) -> TokiResult<Vec<u8>> {
                codec::marshal(&self.0, &Self::layout(), Encoding::Text)
            }

            fn marshal_json(&self) -> TokiResult<Vec<u8>> {
                codec::marshal(&self.0, &Self::layout(), Encoding::Json)
            }

            fn unmarshal_text(&mut self, data: &[u8]) -> TokiResult<()> {
                self.unmarshal(data, Encoding::Text)
            }

            fn unmarshal_json(&mut self, data: &[u8]) -> TokiResult<()> {
                self.unmarshal(data, Encoding::Json)
            }
        }

        impl<Tz: TimeZone> From<DateTime<Tz>> for $name {
            fn from(t: DateTime<Tz>) -> Self {
                Self(t.fixed_offset())
            }
        }

        impl From<$name> for Toki {
            fn from(t: $name) -> Self {
                t.into_toki()
            }
        }

        impl From<&Toki> for $name {
            fn from(t: &Toki) -> Self {
                Self(t.to_date_time())
            }
        }

        /// Displays the epoch count.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_epoch())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}, {})", stringify!($name), self.as_epoch(), self.0)
            }
        }
    };
}

fixed_layout_timestamp!(
    /// An instant that always marshals as whole Unix seconds.
    Timestamp,
    EpochUnit::Seconds,
    Layout::Timestamp
);

fixed_layout_timestamp!(
    /// An instant that always marshals as Unix milliseconds.
    TimestampMillis,
    EpochUnit::Millis,
    Layout::TimestampMilli
);

fixed_layout_timestamp!(
    /// An instant that always marshals as Unix nanoseconds.
    ///
    /// Instants outside roughly 1677..2262 CE wrap when marshaled.
    TimestampNanos,
    EpochUnit::Nanos,
    Layout::TimestampNano
);
