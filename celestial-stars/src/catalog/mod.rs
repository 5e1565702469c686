//! Catalog line parsing.
//!
//! - [`hipparcos`]: the pipe-delimited Hipparcos main catalog (`hip_main.dat`)
//! - [`sexagesimal`]: RA/Dec field readers (`hh mm ss.ss`, `±dd mm ss.s`)
//! - [`source`]: catalog file discovery and line reading (plain or gzipped)
//!
//! A [`CatalogParser`] turns one text line into a [`RawStarRecord`] or a
//! [`LineParseError`]. Rejections are per-line and never abort a run.

pub mod hipparcos;
pub mod sexagesimal;
pub mod source;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MissingPositionPolicy;
use crate::epoch::{julian_year_to_unix, HIPPARCOS_EPOCH_JYEAR, HIPPARCOS_TT_MINUS_UTC};

/// One catalog entry after parsing, before photometric conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawStarRecord {
    /// Catalog number of the star (HIP number for Hipparcos).
    pub catalog_id: u32,
    /// Right ascension (ICRS), degrees.
    pub ra: f64,
    /// Declination (ICRS), degrees.
    pub dec: f64,
    /// Parallax, milliarcseconds.
    pub parallax: f64,
    /// Proper motion in RA, milliarcseconds/year.
    pub pm_ra: f64,
    /// Proper motion in Dec, milliarcseconds/year.
    pub pm_dec: f64,
    /// Johnson V magnitude.
    pub v_mag: f64,
    /// Johnson B-V color index, `None` when the catalog has no measurement.
    pub bv: Option<f64>,
}

/// Supported (and declared) catalog layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// Hipparcos main catalog (ESA 1997, I/239).
    Hipparcos,
    /// Tycho-2 (I/259). Declared but not parsed.
    Tycho2,
}

impl CatalogFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Hipparcos => "hipparcos",
            Self::Tycho2 => "tycho2",
        }
    }

    /// Whether a parser exists for this layout.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Hipparcos)
    }

    /// Batch filename template; `{}` is replaced by the zero-based batch index.
    pub fn batch_template(self) -> &'static str {
        match self {
            Self::Hipparcos => "dat_hp_{}.json",
            Self::Tycho2 => "dat_t2_{}.json",
        }
    }

    pub fn batch_filename(self, index: usize) -> String {
        self.batch_template().replacen("{}", &index.to_string(), 1)
    }

    /// Output filename of the metadata document.
    pub fn metadata_filename(self) -> &'static str {
        match self {
            Self::Hipparcos => "dat_hp_meta.json",
            Self::Tycho2 => "dat_t2_meta.json",
        }
    }

    /// Whether `filename` is a source file of this catalog (plain or `.gz`).
    pub fn matches_source_file(self, filename: &str) -> bool {
        let stem = filename.strip_suffix(".gz").unwrap_or(filename);
        match self {
            Self::Hipparcos => stem == "hip_main.dat",
            Self::Tycho2 => stem
                .strip_prefix("tyc2_")
                .and_then(|rest| rest.strip_suffix(".dat"))
                .is_some_and(|num| num.len() == 2 && num.bytes().all(|b| b.is_ascii_digit())),
        }
    }

    /// Reference epoch of the catalog's proper motions, Unix seconds.
    pub fn pm_epoch(self) -> i64 {
        // Tycho-2 positions are also reduced to the Hipparcos epoch.
        julian_year_to_unix(HIPPARCOS_EPOCH_JYEAR, HIPPARCOS_TT_MINUS_UTC)
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons a catalog line is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineParseError {
    #[error("expected more columns, found {found}")]
    TooFewFields { found: usize },

    #[error("column {column}: invalid integer `{value}`")]
    InvalidInteger { column: usize, value: String },

    #[error("column {column}: invalid number `{value}`")]
    InvalidFloat { column: usize, value: String },

    #[error("column {column}: invalid sexagesimal angle `{value}`")]
    InvalidAngle { column: usize, value: String },

    #[error("star #{catalog_id} has no position")]
    MissingPosition { catalog_id: u32 },

    #[error("catalog format {0} is not supported")]
    UnsupportedFormat(CatalogFormat),
}

/// Line parser bound to one catalog layout and a missing-position policy.
#[derive(Debug, Clone, Copy)]
pub struct CatalogParser {
    format: CatalogFormat,
    missing_position: MissingPositionPolicy,
}

impl CatalogParser {
    pub fn new(format: CatalogFormat, missing_position: MissingPositionPolicy) -> Self {
        Self {
            format,
            missing_position,
        }
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }

    pub fn parse_line(&self, line: &str) -> Result<RawStarRecord, LineParseError> {
        match self.format {
            CatalogFormat::Hipparcos => hipparcos::parse_line(line, self.missing_position),
            CatalogFormat::Tycho2 => Err(LineParseError::UnsupportedFormat(self.format)),
        }
    }

    /// Column dump used in rejection warnings.
    pub fn describe_line(&self, line: &str) -> String {
        match self.format {
            CatalogFormat::Hipparcos => hipparcos::describe_fields(line),
            CatalogFormat::Tycho2 => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_filenames() {
        assert_eq!(CatalogFormat::Hipparcos.batch_filename(0), "dat_hp_0.json");
        assert_eq!(CatalogFormat::Hipparcos.batch_filename(12), "dat_hp_12.json");
        assert_eq!(CatalogFormat::Tycho2.batch_filename(3), "dat_t2_3.json");
        assert_eq!(CatalogFormat::Hipparcos.metadata_filename(), "dat_hp_meta.json");
    }

    #[test]
    fn test_source_file_matching() {
        assert!(CatalogFormat::Hipparcos.matches_source_file("hip_main.dat"));
        assert!(CatalogFormat::Hipparcos.matches_source_file("hip_main.dat.gz"));
        assert!(!CatalogFormat::Hipparcos.matches_source_file("hip2.dat"));

        assert!(CatalogFormat::Tycho2.matches_source_file("tyc2_07.dat.gz"));
        assert!(CatalogFormat::Tycho2.matches_source_file("tyc2_19.dat"));
        assert!(!CatalogFormat::Tycho2.matches_source_file("tyc2_7.dat.gz"));
        assert!(!CatalogFormat::Tycho2.matches_source_file("tyc2_ab.dat"));
        assert!(!CatalogFormat::Tycho2.matches_source_file("hip_main.dat"));
    }

    #[test]
    fn test_unsupported_format_rejects_every_line() {
        let parser = CatalogParser::new(CatalogFormat::Tycho2, MissingPositionPolicy::DefaultToZero);
        for line in ["", "0001 00001 1|", "anything at all"] {
            assert_eq!(
                parser.parse_line(line),
                Err(LineParseError::UnsupportedFormat(CatalogFormat::Tycho2))
            );
        }
        assert!(!CatalogFormat::Tycho2.is_supported());
        assert!(CatalogFormat::Hipparcos.is_supported());
    }

    #[test]
    fn test_format_serde_names() {
        let json = serde_json::to_string(&[CatalogFormat::Hipparcos, CatalogFormat::Tycho2]).unwrap();
        assert_eq!(json, r#"["hipparcos","tycho2"]"#);
    }
}
