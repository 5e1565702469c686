//! Sexagesimal angle fields.
//!
//! Catalog positions are stored as three space-separated sub-fields in one
//! column: `hh mm ss.ss` for right ascension and `±dd mm ss.s` for declination.
//! The sign lives on the first sub-field and is read from the text, not from
//! the parsed integer: `-00 12 34` is a negative angle even though `-0 == 0`.

use thiserror::Error;

/// Seconds of time per degree of right ascension (3600 / 15).
const SECONDS_PER_RA_DEGREE: f64 = 240.0;

const ARCSECONDS_PER_DEGREE: f64 = 3600.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid sexagesimal field `{0}`")]
pub struct InvalidSexagesimal(pub String);

struct Components {
    negative: bool,
    whole: i32,
    minutes: i32,
    seconds: f64,
}

impl Components {
    fn total_seconds(&self) -> f64 {
        (self.whole.unsigned_abs() as f64) * 3600.0 + (self.minutes as f64) * 60.0 + self.seconds
    }

    fn sign(&self) -> f64 {
        if self.negative {
            -1.0
        } else {
            1.0
        }
    }
}

/// Reads a right ascension field (`h m s`) into degrees.
///
/// Returns `Ok(None)` for an empty field.
///
/// ```
/// use celestial_stars::catalog::sexagesimal::read_ra;
///
/// let ra = read_ra("06 45 08.92").unwrap().unwrap();
/// assert!((ra - 101.287166).abs() < 1e-5);
/// ```
pub fn read_ra(item: &str) -> Result<Option<f64>, InvalidSexagesimal> {
    Ok(read_components(item)?.map(|c| c.sign() * c.total_seconds() / SECONDS_PER_RA_DEGREE))
}

/// Reads a declination field (`±d m s`) into degrees.
///
/// Returns `Ok(None)` for an empty field.
pub fn read_dec(item: &str) -> Result<Option<f64>, InvalidSexagesimal> {
    Ok(read_components(item)?.map(|c| c.sign() * c.total_seconds() / ARCSECONDS_PER_DEGREE))
}

fn read_components(item: &str) -> Result<Option<Components>, InvalidSexagesimal> {
    let item = item.trim();
    if item.is_empty() {
        return Ok(None);
    }
    let invalid = || InvalidSexagesimal(item.to_string());
    let mut parts = item.split_whitespace();
    let whole = parts.next().ok_or_else(invalid)?;
    let minutes = parts.next().ok_or_else(invalid)?;
    let seconds = parts.next().ok_or_else(invalid)?;
    Ok(Some(Components {
        negative: whole.starts_with('-'),
        whole: whole.parse().map_err(|_| invalid())?,
        minutes: minutes.parse().map_err(|_| invalid())?,
        seconds: seconds.parse().map_err(|_| invalid())?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ra_conversion() {
        // 01h 00m 00s = 15 degrees
        let ra = read_ra("01 00 00.00").unwrap().unwrap();
        assert!((ra - 15.0).abs() < 1e-12);

        let ra = read_ra("23 59 59.99").unwrap().unwrap();
        let expected = (23.0 * 3600.0 + 59.0 * 60.0 + 59.99) / 240.0;
        assert!((ra - expected).abs() < 1e-12);
    }

    #[test]
    fn test_dec_conversion() {
        let dec = read_dec("+45 30 00.0").unwrap().unwrap();
        assert!((dec - 45.5).abs() < 1e-12);

        let dec = read_dec("-16 42 58.0").unwrap().unwrap();
        let expected = -(16.0 * 3600.0 + 42.0 * 60.0 + 58.0) / 3600.0;
        assert!((dec - expected).abs() < 1e-12);
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        let dec = read_dec("-0 12 34").unwrap().unwrap();
        assert!(dec < 0.0);
        let expected = -(12.0 * 60.0 + 34.0) / 3600.0;
        assert!((dec - expected).abs() < 1e-12);

        let dec = read_dec("-00 00 01.0").unwrap().unwrap();
        assert!(dec < 0.0);

        let ra = read_ra("-0 12 34").unwrap().unwrap();
        assert!(ra < 0.0);
    }

    #[test]
    fn test_positive_zero() {
        let dec = read_dec("+00 12 34").unwrap().unwrap();
        assert!(dec > 0.0);
    }

    #[test]
    fn test_empty_field_is_absent() {
        assert_eq!(read_ra("").unwrap(), None);
        assert_eq!(read_dec("   ").unwrap(), None);
    }

    #[test]
    fn test_malformed_fields() {
        assert!(read_ra("12 34").is_err());
        assert!(read_dec("ab 12 34.0").is_err());
        assert!(read_dec("+12 3x 34.0").is_err());
        assert!(read_ra("12 34 zz").is_err());
    }
}
