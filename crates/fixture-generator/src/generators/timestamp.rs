//! Formatted timestamp generator.

use crate::generator::GeneratorError;
use chrono::{DateTime, NaiveDate, Utc};
use fixture_core::FixtureValue;
use rand::Rng;
use std::fmt::Write;

/// Pick a random second between January 1st of `start_year` and
/// December 31st 23:59:59 of `end_year`.
pub fn random_datetime<R: Rng>(rng: &mut R, start_year: i32, end_year: i32) -> Option<DateTime<Utc>> {
    let start = NaiveDate::from_ymd_opt(start_year, 1, 1)?
        .and_hms_opt(0, 0, 0)?
        .and_utc();
    let end = NaiveDate::from_ymd_opt(end_year, 12, 31)?
        .and_hms_opt(23, 59, 59)?
        .and_utc();
    if start > end {
        return None;
    }

    let ts = rng.gen_range(start.timestamp()..=end.timestamp());
    DateTime::from_timestamp(ts, 0)
}

/// Generate a random timestamp rendered with a strftime `format`.
pub fn generate_timestamp<R: Rng>(
    rng: &mut R,
    start_year: i32,
    end_year: i32,
    format: &str,
) -> Result<FixtureValue, GeneratorError> {
    let dt = random_datetime(rng, start_year, end_year).ok_or(GeneratorError::TimestampRange {
        start_year,
        end_year,
    })?;

    // chrono reports unrenderable formats through fmt::Error
    let mut rendered = String::new();
    write!(rendered, "{}", dt.format(format))
        .map_err(|_| GeneratorError::TimestampFormat(format.to_string()))?;

    Ok(FixtureValue::Text(rendered))
}
