//! Pipeline configuration.
//!
//! [`ExportConfig`] is an immutable value handed to
//! [`run_pipeline`](crate::pipeline::run_pipeline). It can be loaded from a
//! JSON document in which every field is optional:
//!
//! ```json
//! {
//!   "enable_global_color_normalization": false,
//!   "batch_initial_size": 50,
//!   "missing_position": "drop"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogFormat;
use crate::errors::{StarsError, StarsResult};
use crate::photometry::Rgb;

/// What to do with a catalog line whose RA or Dec field is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPositionPolicy {
    /// Keep the star with the missing coordinate set to 0.0 (output-compatible).
    #[default]
    DefaultToZero,
    /// Reject the line.
    Drop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Scale each star's color so its brightest channel is 1.
    pub enable_local_color_normalization: bool,
    /// Scale all colors so the brightest channel in the dataset is 1.
    pub enable_global_color_normalization: bool,
    /// Target size of the first (brightest) batch.
    pub batch_initial_size: usize,
    /// Multiplier applied to the batch target after each flush.
    pub batch_growth_factor: f64,
    /// Decimal digits kept in each color channel.
    pub color_significant_digits: u32,
    /// Color of stars with no B-V measurement.
    pub default_color_for_missing_bv: Rgb,
    pub missing_position: MissingPositionPolicy,
    /// Gzip every output file and add a `.gz` suffix to its name.
    pub compress_output: bool,
    /// Catalogs to process, in order.
    pub catalogs: Vec<CatalogFormat>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enable_local_color_normalization: true,
            enable_global_color_normalization: true,
            batch_initial_size: 100,
            batch_growth_factor: 4.0,
            color_significant_digits: 4,
            default_color_for_missing_bv: Rgb::DEFAULT_STAR,
            missing_position: MissingPositionPolicy::DefaultToZero,
            compress_output: false,
            catalogs: vec![CatalogFormat::Hipparcos],
        }
    }
}

impl ExportConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: &Path) -> StarsResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| StarsError::io(path, e))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StarsResult<()> {
        if self.batch_initial_size == 0 {
            return Err(StarsError::config("batch_initial_size must be at least 1"));
        }
        if !self.batch_growth_factor.is_finite() || self.batch_growth_factor < 1.0 {
            return Err(StarsError::config(
                "batch_growth_factor must be a finite number >= 1.0",
            ));
        }
        if self.color_significant_digits > 15 {
            return Err(StarsError::config(
                "color_significant_digits must be at most 15",
            ));
        }
        if !self.default_color_for_missing_bv.is_unit_range() {
            return Err(StarsError::config(
                "default_color_for_missing_bv channels must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert!(config.enable_local_color_normalization);
        assert!(config.enable_global_color_normalization);
        assert_eq!(config.batch_initial_size, 100);
        assert_eq!(config.batch_growth_factor, 4.0);
        assert_eq!(config.color_significant_digits, 4);
        assert_eq!(config.default_color_for_missing_bv, Rgb(0.9, 0.9, 0.9));
        assert_eq!(config.missing_position, MissingPositionPolicy::DefaultToZero);
        assert!(!config.compress_output);
        assert_eq!(config.catalogs, vec![CatalogFormat::Hipparcos]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: ExportConfig = serde_json::from_str(
            r#"{
                "enable_global_color_normalization": false,
                "batch_initial_size": 50,
                "default_color_for_missing_bv": [1.0, 1.0, 1.0],
                "missing_position": "drop",
                "catalogs": ["hipparcos", "tycho2"]
            }"#,
        )
        .unwrap();
        assert!(config.enable_local_color_normalization);
        assert!(!config.enable_global_color_normalization);
        assert_eq!(config.batch_initial_size, 50);
        assert_eq!(config.batch_growth_factor, 4.0);
        assert_eq!(config.default_color_for_missing_bv, Rgb(1.0, 1.0, 1.0));
        assert_eq!(config.missing_position, MissingPositionPolicy::Drop);
        assert_eq!(
            config.catalogs,
            vec![CatalogFormat::Hipparcos, CatalogFormat::Tycho2]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ExportConfig, _> = serde_json::from_str(r#"{"batch_size": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let bad = ExportConfig {
            batch_initial_size: 0,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(StarsError::Config { .. })));

        let bad = ExportConfig {
            batch_growth_factor: 0.5,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = ExportConfig {
            batch_growth_factor: f64::NAN,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = ExportConfig {
            default_color_for_missing_bv: Rgb(1.2, 0.9, 0.9),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stars.json");
        fs::write(&path, r#"{"batch_growth_factor": 2.0}"#).unwrap();
        let config = ExportConfig::load(&path).unwrap();
        assert_eq!(config.batch_growth_factor, 2.0);

        fs::write(&path, r#"{"batch_growth_factor": 0.0}"#).unwrap();
        assert!(matches!(
            ExportConfig::load(&path),
            Err(StarsError::Config { .. })
        ));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(ExportConfig::load(&path), Err(StarsError::Json(_))));
    }
}
