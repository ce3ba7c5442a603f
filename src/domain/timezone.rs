use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// One entry of the fixed timezone selection surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const TIMEZONE_CHOICES: [TimezoneOption; 6] = [
    TimezoneOption {
        value: "America/New_York",
        label: "Eastern Time (ET)",
    },
    TimezoneOption {
        value: "Asia/Kolkata",
        label: "India Standard Time (IST)",
    },
    TimezoneOption {
        value: "America/Los_Angeles",
        label: "Pacific Time (PST)",
    },
    TimezoneOption {
        value: "Europe/London",
        label: "Greenwich Mean Time (GMT)",
    },
    TimezoneOption {
        value: "America/Chicago",
        label: "Central Time (CT)",
    },
    TimezoneOption {
        value: "Asia/Tokyo",
        label: "Japan Standard Time (JST)",
    },
];

pub fn parse_zone(value: &str) -> Option<Tz> {
    value.parse().ok()
}

/// Maps an instant picked while "thinking in" `from` to the instant a user
/// "thinking in" `to` would pick for the same wall-clock reading.
///
/// The wall-clock fields of the instant are rendered under `from` and then
/// re-interpreted as a local reading under `to`. The printed calendar/clock
/// digits survive the conversion; the absolute instant does not.
pub fn convert(instant: Option<DateTime<Utc>>, from: Tz, to: Tz) -> Option<DateTime<Utc>> {
    let instant = instant?;
    let wall = instant.with_timezone(&from).naive_local();
    Some(resolve_wall_clock(wall, to).unwrap_or(instant))
}

/// Readings duplicated by a DST fold resolve to the earlier candidate;
/// readings inside a spring-forward gap shift one hour later.
fn resolve_wall_clock(wall: NaiveDateTime, zone: Tz) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(mapped) => Some(mapped.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => zone
            .from_local_datetime(&(wall + Duration::hours(1)))
            .earliest()
            .map(|mapped| mapped.with_timezone(&Utc)),
    }
}

/// Review-surface rendering, e.g. "Wed, Jan 1, 2025, 10:00 AM".
pub fn format_in_zone(instant: Option<DateTime<Utc>>, zone: Tz) -> String {
    match instant {
        Some(instant) => instant
            .with_timezone(&zone)
            .format("%a, %b %-d, %Y, %-I:%M %p")
            .to_string(),
        None => "Not selected".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::{Kolkata, Tokyo};
    use chrono_tz::Europe::London;
    use proptest::prelude::*;

    fn fixed_time(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .expect("valid datetime")
            .with_timezone(&Utc)
    }

    fn wall_digits(instant: DateTime<Utc>, zone: Tz) -> String {
        instant
            .with_timezone(&zone)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    #[test]
    fn convert_preserves_printed_digits_not_the_instant() {
        // 10:00 on the New York clock.
        let instant = fixed_time("2025-01-01T15:00:00Z");
        let converted = convert(Some(instant), New_York, Kolkata).expect("converted instant");

        assert_eq!(wall_digits(instant, New_York), wall_digits(converted, Kolkata));
        assert_ne!(converted, instant);
    }

    #[test]
    fn convert_passes_null_through() {
        assert_eq!(convert(None, New_York, Tokyo), None);
    }

    #[test]
    fn convert_resolves_fold_reading_to_earlier_candidate() {
        // 01:30 on the New York clock occurs twice on 2025-11-02.
        let converted = convert(
            Some(fixed_time("2025-11-02T01:30:00Z")),
            chrono_tz::UTC,
            New_York,
        )
        .expect("converted instant");

        assert_eq!(wall_digits(converted, New_York), "2025-11-02 01:30:00");
        // Earlier of the two candidates: still in EDT (UTC-4).
        assert_eq!(converted, fixed_time("2025-11-02T05:30:00Z"));
    }

    #[test]
    fn convert_shifts_gap_reading_one_hour_later() {
        // 02:30 on the New York clock does not exist on 2026-03-08.
        let converted = convert(
            Some(fixed_time("2026-03-08T02:30:00Z")),
            chrono_tz::UTC,
            New_York,
        )
        .expect("converted instant");
        assert_eq!(wall_digits(converted, New_York), "2026-03-08 03:30:00");
    }

    #[test]
    fn london_round_trip_reproduces_digits() {
        let instant = fixed_time("2025-06-15T09:45:00Z");
        let there = convert(Some(instant), New_York, London).expect("forward");
        let back = convert(Some(there), London, New_York).expect("back");
        assert_eq!(wall_digits(back, New_York), wall_digits(instant, New_York));
    }

    #[test]
    fn format_in_zone_renders_review_string() {
        let instant = fixed_time("2025-01-01T15:00:00Z");
        assert_eq!(
            format_in_zone(Some(instant), New_York),
            "Wed, Jan 1, 2025, 10:00 AM"
        );
        assert_eq!(format_in_zone(None, New_York), "Not selected");
    }

    proptest! {
        // DST-free zones keep every wall reading unambiguous, so the round
        // trip must reproduce the printed digits for any instant.
        #[test]
        fn round_trip_preserves_wall_digits(seconds in 0i64..4_000_000_000i64) {
            let instant = Utc
                .timestamp_opt(seconds, 0)
                .single()
                .expect("valid timestamp");
            let there = convert(Some(instant), Kolkata, Tokyo).expect("forward");
            let back = convert(Some(there), Tokyo, Kolkata).expect("back");
            prop_assert_eq!(wall_digits(back, Kolkata), wall_digits(instant, Kolkata));
            prop_assert_eq!(wall_digits(there, Tokyo), wall_digits(instant, Kolkata));
        }
    }
}
