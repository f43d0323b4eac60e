//! Round-trip properties over generated instants.

mod common;

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use toki::calendar;
use toki::{Marshaler, Timestamp, TimestampMillis, TimestampNanos, Toki};

/// 0000-01-02T00:00:00Z
const FIRST_SAFE_SEC: i64 = -62_167_132_800;
/// 9999-12-30T23:59:59Z
const LAST_SAFE_SEC: i64 = 253_402_214_399;

fn four_digit_year() -> impl Strategy<Value = Toki> {
    (
        FIRST_SAFE_SEC..=LAST_SAFE_SEC,
        0..1_000_000_000_i64,
        -1439..=1439_i32,
    )
        .prop_map(|(secs, nsecs, offset_mins)| {
            let t = Toki::from_unix(secs, nsecs).unwrap();
            t.with_offset(calendar::zone(offset_mins * 60).unwrap())
        })
}

proptest! {
    #[test]
    fn rfc3339_round_trip(t in four_digit_year()) {
        common::test_run();
        let json = t.marshal_json().unwrap();
        let mut back = Toki::default();
        back.unmarshal_json(&json).unwrap();
        prop_assert!(back.equal_time_and_zone(&t), "{:?} != {:?}", back, t);

        let text = t.marshal_text().unwrap();
        let mut back = Toki::default();
        back.unmarshal_text(&text).unwrap();
        prop_assert!(back.equal_time_and_zone(&t), "{:?} != {:?}", back, t);
    }

    #[test]
    fn nanos_round_trip(n: i64) {
        prop_assert_eq!(Toki::from_unix_nano(n).unix_nano(), n);
        prop_assert_eq!(TimestampNanos::from_epoch(n).unwrap().as_epoch(), n);
    }

    #[test]
    fn seconds_round_trip(
        s in DateTime::<Utc>::MIN_UTC.timestamp()..=DateTime::<Utc>::MAX_UTC.timestamp()
    ) {
        prop_assert_eq!(Toki::from_unix(s, 0).unwrap().unix(), s);
        prop_assert_eq!(Timestamp::from_epoch(s).unwrap().as_epoch(), s);
    }

    #[test]
    fn millis_round_trip(
        ms in DateTime::<Utc>::MIN_UTC.timestamp_millis()..=DateTime::<Utc>::MAX_UTC.timestamp_millis()
    ) {
        prop_assert_eq!(Toki::from_unix_milli(ms).unwrap().unix_milli(), ms);
        prop_assert_eq!(TimestampMillis::from_epoch(ms).unwrap().as_epoch(), ms);
    }

    #[test]
    fn decimal_in_image_out(n: i64) {
        let mut t = TimestampNanos::default();
        t.unmarshal_json(n.to_string().as_bytes()).unwrap();
        prop_assert_eq!(t.marshal_json().unwrap(), n.to_be_bytes().to_vec());
    }

    #[test]
    fn failed_unmarshal_is_not_observable(s in "[a-z ]{1,12}", secs in 0..4_000_000_000_i64) {
        let before = Toki::from_unix(secs, 0).unwrap();
        for layout in ["RFC3339", "timestamp", "timestamp_milli", "timestamp_nano"] {
            let mut t = before.clone().with_layout(layout);
            prop_assert!(t.unmarshal_text(s.as_bytes()).is_err());
            prop_assert!(t.equal_time_and_zone(&before));
        }
    }

    #[test]
    fn layout_never_changes_the_instant(t in four_digit_year()) {
        for layout in ["RFC3339", "timestamp", "timestamp_milli", "timestamp_nano", "%Y"] {
            let relaid = t.clone().with_layout(layout);
            prop_assert!(relaid.equal_time_and_zone(&t));
            prop_assert_eq!(relaid.unix_nano(), t.unix_nano());
        }
    }
}
