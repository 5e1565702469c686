//! Hipparcos main catalog parser (ESA 1997, I/239 `hip_main.dat`).
//!
//! Each line is a `|`-delimited record of 78 fields. Only the following are read:
//!
//! | Column | Field | Handling |
//! |--------|-------|----------|
//! | 1 | HIP number | required integer |
//! | 3 | RA, `hh mm ss.ss` | sexagesimal, empty = absent |
//! | 4 | Dec, `±dd mm ss.s` | sexagesimal, empty = absent |
//! | 5 | V magnitude | required float |
//! | 11 | parallax (mas) | empty = 0 |
//! | 12, 13 | proper motion RA/Dec (mas/yr) | empty = 0 |
//! | 37 | B-V | empty = `None` |

use super::sexagesimal::{read_dec, read_ra};
use super::{LineParseError, RawStarRecord};
use crate::config::MissingPositionPolicy;

pub const COL_HIP: usize = 1;
pub const COL_RA_HMS: usize = 3;
pub const COL_DEC_DMS: usize = 4;
pub const COL_VMAG: usize = 5;
pub const COL_RA_DEG: usize = 8;
pub const COL_DEC_DEG: usize = 9;
pub const COL_PARALLAX: usize = 11;
pub const COL_PM_RA: usize = 12;
pub const COL_PM_DEC: usize = 13;
pub const COL_BV: usize = 37;

const MIN_FIELDS: usize = COL_BV + 1;

/// Columns echoed in the warning for a rejected line.
const DIAGNOSTIC_COLUMNS: [usize; 8] = [
    COL_HIP,
    COL_RA_DEG,
    COL_DEC_DEG,
    COL_PARALLAX,
    COL_PM_RA,
    COL_PM_DEC,
    COL_VMAG,
    COL_BV,
];

fn split_fields(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

pub fn parse_line(
    line: &str,
    missing_position: MissingPositionPolicy,
) -> Result<RawStarRecord, LineParseError> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return Err(LineParseError::TooFewFields {
            found: fields.len(),
        });
    }

    let catalog_id: u32 = fields[COL_HIP]
        .parse()
        .map_err(|_| LineParseError::InvalidInteger {
            column: COL_HIP,
            value: fields[COL_HIP].to_string(),
        })?;
    let v_mag = parse_required_f64(&fields, COL_VMAG)?;

    let ra = read_ra(fields[COL_RA_HMS]).map_err(|_| invalid_angle(&fields, COL_RA_HMS))?;
    let dec = read_dec(fields[COL_DEC_DMS]).map_err(|_| invalid_angle(&fields, COL_DEC_DMS))?;
    let (ra, dec) = match (ra, dec, missing_position) {
        (Some(ra), Some(dec), _) => (ra, dec),
        (_, _, MissingPositionPolicy::Drop) => {
            return Err(LineParseError::MissingPosition { catalog_id })
        }
        (ra, dec, MissingPositionPolicy::DefaultToZero) => {
            (ra.unwrap_or(0.0), dec.unwrap_or(0.0))
        }
    };

    Ok(RawStarRecord {
        catalog_id,
        ra,
        dec,
        parallax: parse_nullable_f64(&fields, COL_PARALLAX)?.unwrap_or(0.0),
        pm_ra: parse_nullable_f64(&fields, COL_PM_RA)?.unwrap_or(0.0),
        pm_dec: parse_nullable_f64(&fields, COL_PM_DEC)?.unwrap_or(0.0),
        v_mag,
        bv: parse_nullable_f64(&fields, COL_BV)?,
    })
}

/// `"1: 32349, 8: 101.28854105, ..."` for the diagnostic columns present in `line`.
pub fn describe_fields(line: &str) -> String {
    let fields = split_fields(line);
    DIAGNOSTIC_COLUMNS
        .iter()
        .map(|&col| format!("{}: {}", col, fields.get(col).copied().unwrap_or("")))
        .collect::<Vec<_>>()
        .join(", ")
}

fn invalid_angle(fields: &[&str], column: usize) -> LineParseError {
    LineParseError::InvalidAngle {
        column,
        value: fields[column].to_string(),
    }
}

fn parse_required_f64(fields: &[&str], column: usize) -> Result<f64, LineParseError> {
    fields[column]
        .parse()
        .map_err(|_| LineParseError::InvalidFloat {
            column,
            value: fields[column].to_string(),
        })
}

fn parse_nullable_f64(fields: &[&str], column: usize) -> Result<Option<f64>, LineParseError> {
    if fields[column].is_empty() {
        return Ok(None);
    }
    parse_required_f64(fields, column).map(Some)
}
