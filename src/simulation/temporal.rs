//! Temporal utilities for randomized timestamps
//!
//! Pure functions over an injected randomness stream: backdated visit
//! timestamps, the checkout delay, and the string conversions used when
//! records come back in from the wire.
//!
//! Both generators take an optional seed. When one is given the caller's
//! stream is replaced by a freshly seeded one immediately before drawing, so
//! two calls with the same seed produce the same values. The reset sticks:
//! later draws on that stream continue from the seeded state.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use rand::{Rng, SeedableRng};

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::time_ranges;

fn reseed<R: SeedableRng>(rng: &mut R, seed: Option<u64>) {
    if let Some(seed) = seed {
        *rng = R::seed_from_u64(seed);
    }
}

/// Generate between one and five timestamps backdated from `base`
///
/// Each timestamp subtracts an independent random offset of 1-10 days,
/// 0-23 hours, 0-59 minutes, 0-59 seconds and 0-999999 microseconds, so every
/// result is strictly before `base`. Results are neither distinct nor sorted.
pub fn random_past_timestamps<R>(
    rng: &mut R,
    base: DateTime<Utc>,
    seed: Option<u64>,
) -> Vec<DateTime<Utc>>
where
    R: Rng + SeedableRng,
{
    reseed(rng, seed);

    let count =
        rng.gen_range(time_ranges::MIN_PAST_TIMESTAMPS..=time_ranges::MAX_PAST_TIMESTAMPS);

    (0..count)
        .map(|_| {
            let offset = Duration::days(
                rng.gen_range(time_ranges::MIN_DAYS_BEFORE..=time_ranges::MAX_DAYS_BEFORE),
            ) + Duration::hours(rng.gen_range(0..=time_ranges::MAX_HOURS_BEFORE))
                + Duration::minutes(rng.gen_range(0..=time_ranges::MAX_MINUTES_BEFORE))
                + Duration::seconds(rng.gen_range(0..=time_ranges::MAX_SECONDS_BEFORE))
                + Duration::microseconds(
                    rng.gen_range(0..=time_ranges::MAX_MICROSECONDS_BEFORE),
                );
            base - offset
        })
        .collect()
}

/// Add a uniformly chosen delay of 3-17 whole minutes to `timestamp`
pub fn add_random_minutes<R>(rng: &mut R, timestamp: DateTime<Utc>, seed: Option<u64>) -> DateTime<Utc>
where
    R: Rng + SeedableRng,
{
    reseed(rng, seed);

    let minutes = rng.gen_range(
        time_ranges::MIN_CHECKOUT_DELAY_MINUTES..=time_ranges::MAX_CHECKOUT_DELAY_MINUTES,
    );
    timestamp + Duration::minutes(minutes)
}

/// Parse a timestamp from an ISO-8601 string or an explicit `strftime` format
///
/// Without a format, RFC 3339 strings (with offset) are accepted as well as
/// naive `YYYY-MM-DDTHH:MM:SS[.ffffff]` datetimes and bare dates; naive values
/// are read as UTC. With a format, the same fallbacks apply to the parse
/// result.
pub fn parse_timestamp(value: &str, format: Option<&str>) -> SimulationResult<DateTime<Utc>> {
    let value = value.trim();

    let parsed = match format {
        Some(format) => DateTime::parse_from_str(value, format)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(value, format).ok().map(|dt| dt.and_utc()))
            .or_else(|| {
                NaiveDate::parse_from_str(value, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            }),
        None => DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.and_utc())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            }),
    };

    parsed.ok_or_else(|| match format {
        Some(format) => SimulationError::malformed_input(format!(
            "timestamp '{}' does not match format '{}'",
            value, format
        )),
        None => SimulationError::malformed_input(format!(
            "timestamp '{}' is not ISO-8601",
            value
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_past_timestamps_are_before_base_and_within_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let base = base_time();

        for _ in 0..200 {
            let timestamps = random_past_timestamps(&mut rng, base, None);
            assert!((1..=5).contains(&timestamps.len()));

            for timestamp in timestamps {
                assert!(timestamp < base);
                let diff = base - timestamp;
                assert!(diff >= Duration::days(1));
                assert!(
                    diff <= Duration::days(10)
                        + Duration::hours(23)
                        + Duration::minutes(59)
                        + Duration::seconds(59)
                        + Duration::microseconds(999_999)
                );
            }
        }
    }

    #[test]
    fn test_past_timestamps_with_same_seed_are_identical() {
        let base = base_time();
        let mut first = StdRng::seed_from_u64(1000);
        let mut second = StdRng::seed_from_u64(2000);

        let a = random_past_timestamps(&mut first, base, Some(77));
        let b = random_past_timestamps(&mut second, base, Some(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_reset_affects_the_callers_stream() {
        let mut first = StdRng::seed_from_u64(1);
        let mut second = StdRng::seed_from_u64(2);

        random_past_timestamps(&mut first, base_time(), Some(5));
        random_past_timestamps(&mut second, base_time(), Some(5));

        let next_first: u64 = first.gen();
        let next_second: u64 = second.gen();
        assert_eq!(next_first, next_second);
    }

    #[test]
    fn test_add_random_minutes_within_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let base = base_time();

        for _ in 0..500 {
            let shifted = add_random_minutes(&mut rng, base, None);
            let diff = shifted - base;
            assert!(diff >= Duration::minutes(3));
            assert!(diff <= Duration::minutes(17));
            assert_eq!(diff.num_seconds() % 60, 0);
        }
    }

    #[test]
    fn test_add_random_minutes_seeded() {
        let mut first = StdRng::seed_from_u64(10);
        let mut second = StdRng::seed_from_u64(20);
        assert_eq!(
            add_random_minutes(&mut first, base_time(), Some(8)),
            add_random_minutes(&mut second, base_time(), Some(8))
        );
    }

    #[test]
    fn test_parse_timestamp_iso_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2024-01-15T10:30:00Z", None).unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-15T12:30:00+02:00", None).unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-15T10:30:00", None).unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00.000250", None).unwrap(),
            expected + Duration::microseconds(250)
        );
        assert_eq!(
            parse_timestamp("2024-01-15", None).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_with_explicit_format() {
        let parsed = parse_timestamp("15/01/2024 10:30", Some("%d/%m/%Y %H:%M")).unwrap();
        assert_eq!(parsed, base_time());

        let parsed = parse_timestamp("15.01.2024", Some("%d.%m.%Y")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_failures_are_malformed_input() {
        assert!(matches!(
            parse_timestamp("yesterday", None),
            Err(SimulationError::MalformedInput(_))
        ));
        assert!(matches!(
            parse_timestamp("2024-01-15", Some("%d/%m/%Y")),
            Err(SimulationError::MalformedInput(_))
        ));
    }
}
