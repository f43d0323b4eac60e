//! `serde` integration.
//!
//! A [`Toki`] goes through serde as RFC3339 whatever its layout, so a
//! serialized value always reads back to the same instant and offset. The
//! layout-specific wire forms belong to the byte-level
//! [`Marshaler`](crate::Marshaler). The fixed-layout types have only one
//! form and travel as plain `i64` counts rather than as the 8-byte image.

use std::fmt;

use serde::de::{self, Visitor};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar;
use crate::epoch;
use crate::timestamp::{Timestamp, TimestampMillis, TimestampNanos};
use crate::toki::Toki;

/// Serializes as an RFC3339 string; the layout is not carried.
impl Serialize for Toki {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = calendar::format_rfc3339(&self.to_date_time()).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

struct Rfc3339Visitor;

impl<'de> Visitor<'de> for Rfc3339Visitor {
    type Value = Toki;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an RFC3339 date-time string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        calendar::parse_rfc3339(value)
            .map(Toki::from)
            .map_err(E::custom)
    }
}

/// Deserializes from an RFC3339 string; the result has the RFC3339 layout.
impl<'de> Deserialize<'de> for Toki {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(Rfc3339Visitor)
    }
}

/// Accepts an integer or a decimal string.
struct EpochVisitor;

impl<'de> Visitor<'de> for EpochVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an epoch count as an integer or decimal string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        epoch::parse_decimal(value.as_bytes()).map_err(E::custom)
    }
}

macro_rules! epoch_serde {
    ($name:ident) => {
        /// Serializes as the `i64` epoch count.
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.as_epoch())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let count = deserializer.deserialize_any(EpochVisitor)?;
                $name::from_epoch(count).map_err(de::Error::custom)
            }
        }
    };
}

epoch_serde!(Timestamp);
epoch_serde!(TimestampMillis);
epoch_serde!(TimestampNanos);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        created: Timestamp,
        updated: TimestampMillis,
        seen: TimestampNanos,
    }

    #[test]
    fn fixed_types_as_integers() {
        let record = Record {
            created: Timestamp::from_epoch(851_042_397).unwrap(),
            updated: TimestampMillis::from_epoch(851_042_397_000).unwrap(),
            seen: TimestampNanos::from_epoch(-1).unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"created":851042397,"updated":851042397000,"seen":-1}"#
        );
        assert_eq!(serde_json::from_str::<Record>(&json).unwrap(), record);
    }

    #[test]
    fn fixed_types_accept_decimal_strings() {
        let t: Timestamp = serde_json::from_str(r#""851042397""#).unwrap();
        assert_eq!(t.as_epoch(), 851_042_397);
        assert!(serde_json::from_str::<Timestamp>(r#""soon""#).is_err());
        assert!(serde_json::from_str::<Timestamp>("18446744073709551615").is_err());
        assert!(serde_json::from_str::<Timestamp>("9223372036854775807").is_err());
    }

    #[test_case("RFC3339" ; "rfc3339")]
    #[test_case("timestamp" ; "seconds")]
    #[test_case("timestamp_milli" ; "millis")]
    #[test_case("timestamp_nano" ; "nanos")]
    #[test_case("%Y-%m-%d %H:%M:%S" ; "pattern")]
    fn toki_round_trips_under_every_layout(layout: &str) {
        let pacific = calendar::zone(-8 * 3600).unwrap();
        let t = Toki::from_calendar(1996, 12, 19, 16, 39, 57, 500_000_000, pacific)
            .unwrap()
            .with_layout(layout);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#""1996-12-19T16:39:57.5-08:00""#);
        let back: Toki = serde_json::from_str(&json).unwrap();
        assert!(back.equal_time_and_zone(&t));
        assert_eq!(back.layout(), &Layout::Rfc3339);
    }

    #[test]
    fn toki_reads_rfc3339() {
        let t: Toki = serde_json::from_str(r#""1996-12-19T16:39:57-08:00""#).unwrap();
        assert_eq!(t.unix(), 851_042_397);
        assert_eq!(t.layout(), &Layout::Rfc3339);
        assert!(serde_json::from_str::<Toki>("851042397").is_err());
    }

    #[test]
    fn out_of_range_year_fails_to_serialize() {
        let t = Toki::from_calendar(10000, 1, 1, 0, 0, 0, 0, calendar::utc()).unwrap();
        let err = serde_json::to_string(&t).unwrap_err();
        assert!(err.to_string().contains("year outside of range"));
    }
}
