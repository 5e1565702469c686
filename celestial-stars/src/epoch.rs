//! Proper-motion reference epochs as Unix timestamps.

/// Julian date of J2000.0 (TT).
pub const J2000_JD: f64 = 2451545.0;

/// Julian date of the Unix epoch, 1970-01-01T00:00:00 UTC.
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Hipparcos catalog epoch, J1991.25 (TT).
pub const HIPPARCOS_EPOCH_JYEAR: f64 = 1991.25;

/// TT - UTC in 1991: 32.184 s plus 26 leap seconds.
pub const HIPPARCOS_TT_MINUS_UTC: f64 = 32.184 + 26.0;

/// Julian date (TT) of Julian year `jyear`.
#[inline]
pub fn julian_year_to_jd(jyear: f64) -> f64 {
    J2000_JD + (jyear - 2000.0) * DAYS_PER_JULIAN_YEAR
}

/// Unix seconds (UTC, truncated) of Julian year `jyear` given in TT.
///
/// ```
/// use celestial_stars::epoch::{julian_year_to_unix, HIPPARCOS_EPOCH_JYEAR, HIPPARCOS_TT_MINUS_UTC};
///
/// assert_eq!(julian_year_to_unix(HIPPARCOS_EPOCH_JYEAR, HIPPARCOS_TT_MINUS_UTC), 670_598_941);
/// ```
pub fn julian_year_to_unix(jyear: f64, tt_minus_utc: f64) -> i64 {
    let seconds = (julian_year_to_jd(jyear) - UNIX_EPOCH_JD) * SECONDS_PER_DAY - tt_minus_utc;
    seconds.trunc() as i64
}
