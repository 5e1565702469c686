//! B-V color index → linear RGB.
//!
//! The chain is:
//!
//! 1. `log10(T) = Σ cₙ · bvⁿ` (color temperature in Kelvin)
//! 2. chromaticity `x = Σ cₙ · 10³ⁿ / Tⁿ`, `y = Σ cₙ · xⁿ` from piecewise tables
//! 3. `XYZ` at unit luminance: `X = x / y`, `Y = 1`, `Z = (1 - x - y) / y`
//! 4. linear sRGB by the fixed 3×3 matrix
//!
//! Temperatures outside 1667 K – 25000 K have no chromaticity coefficients and
//! are rejected with [`ColorOutOfRange`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coefficients::{
    select, BV_TEMPERATURE, CHROMATICITY_X, CHROMATICITY_Y, XYZ_TO_LINEAR_SRGB,
};
use super::normalize::{normalize_local, round_rgb};
use crate::config::ExportConfig;

/// Linear RGB triple, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub f64, pub f64, pub f64);

impl Rgb {
    /// Near-white used for stars without a measured B-V.
    pub const DEFAULT_STAR: Rgb = Rgb(0.9, 0.9, 0.9);

    #[inline]
    pub fn max_channel(self) -> f64 {
        self.0.max(self.1).max(self.2)
    }

    #[inline]
    pub fn min_channel(self) -> f64 {
        self.0.min(self.1).min(self.2)
    }

    #[inline]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Rgb {
        Rgb(f(self.0), f(self.1), f(self.2))
    }

    pub fn is_unit_range(self) -> bool {
        self.min_channel() >= 0.0 && self.max_channel() <= 1.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.0, self.1, self.2)
    }
}

/// Temperature derived from a B-V index falls outside the chromaticity tables.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("temperature {temperature:.1} K is out of range, bv: {bv}")]
pub struct ColorOutOfRange {
    pub temperature: f64,
    pub bv: f64,
}

/// Color temperature in Kelvin for a B-V index.
pub fn bv_to_temperature(bv: f64) -> f64 {
    10f64.powf(polynomial(&BV_TEMPERATURE, bv))
}

/// CIE 1931 chromaticity `(x, y)` on the Planckian locus at `temperature`.
///
/// `None` when either coefficient table has no interval containing `temperature`.
pub fn temperature_to_chromaticity(temperature: f64) -> Option<(f64, f64)> {
    let cx = select(&CHROMATICITY_X, temperature)?;
    let cy = select(&CHROMATICITY_Y, temperature)?;
    let x = cx
        .iter()
        .enumerate()
        .map(|(n, c)| c * 10f64.powi(3 * n as i32) / temperature.powi(n as i32))
        .sum::<f64>();
    Some((x, polynomial(cy, x)))
}

/// Tristimulus `[X, Y, Z]` at luminance `Y = 1`.
pub fn chromaticity_to_xyz(x: f64, y: f64) -> [f64; 3] {
    [x / y, 1.0, (1.0 - x - y) / y]
}

pub fn xyz_to_linear_srgb(xyz: [f64; 3]) -> Rgb {
    let row = |r: &[f64; 3]| r[0] * xyz[0] + r[1] * xyz[1] + r[2] * xyz[2];
    Rgb(
        row(&XYZ_TO_LINEAR_SRGB[0]),
        row(&XYZ_TO_LINEAR_SRGB[1]),
        row(&XYZ_TO_LINEAR_SRGB[2]),
    )
}

/// Unnormalized, unrounded linear RGB for a B-V index.
///
/// Channels driven negative by out-of-gamut chromaticities (the coolest stars
/// have a slightly negative blue) are clamped to zero.
pub fn bv_to_linear_rgb(bv: f64) -> Result<Rgb, ColorOutOfRange> {
    let temperature = bv_to_temperature(bv);
    let (x, y) =
        temperature_to_chromaticity(temperature).ok_or(ColorOutOfRange { temperature, bv })?;
    Ok(xyz_to_linear_srgb(chromaticity_to_xyz(x, y)).map(|c| c.max(0.0)))
}

fn polynomial(coef: &[f64; 4], x: f64) -> f64 {
    coef.iter()
        .enumerate()
        .map(|(n, c)| c * x.powi(n as i32))
        .sum()
}

/// Per-star color conversion with the configured local normalization and rounding.
#[derive(Debug, Clone, Copy)]
pub struct ColorConverter {
    local_normalization: bool,
    significant_digits: u32,
    default_color: Rgb,
}

impl ColorConverter {
    pub fn new(local_normalization: bool, significant_digits: u32, default_color: Rgb) -> Self {
        Self {
            local_normalization,
            significant_digits,
            default_color,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(
            config.enable_local_color_normalization,
            config.color_significant_digits,
            config.default_color_for_missing_bv,
        )
    }

    /// Color for an optional B-V index.
    ///
    /// A missing index yields the default color unchanged.
    pub fn convert(&self, bv: Option<f64>) -> Result<Rgb, ColorOutOfRange> {
        let Some(bv) = bv else {
            return Ok(self.default_color);
        };
        let mut rgb = bv_to_linear_rgb(bv)?;
        if self.local_normalization {
            rgb = normalize_local(rgb);
        }
        Ok(round_rgb(rgb, self.significant_digits))
    }
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bv_is_default_white() {
        let converter = ColorConverter::default();
        assert_eq!(converter.convert(None), Ok(Rgb(0.9, 0.9, 0.9)));

        let custom = ColorConverter::new(true, 4, Rgb(0.5, 0.6, 0.7));
        assert_eq!(custom.convert(None), Ok(Rgb(0.5, 0.6, 0.7)));
    }

    #[test]
    fn test_temperature_of_sun_like_star() {
        // B-V 0.65 is roughly solar
        let t = bv_to_temperature(0.65);
        assert!(t > 5500.0 && t < 6000.0, "T = {}", t);
    }

    #[test]
    fn test_temperature_decreases_with_bv() {
        let mut last = f64::INFINITY;
        for i in -3..20 {
            let t = bv_to_temperature(i as f64 * 0.1);
            assert!(t < last);
            last = t;
        }
    }

    #[test]
    fn test_chromaticity_of_6500k_near_d65() {
        let (x, y) = temperature_to_chromaticity(6500.0).unwrap();
        assert!((x - 0.3135).abs() < 2e-3, "x = {}", x);
        assert!((y - 0.3237).abs() < 2e-3, "y = {}", y);
    }

    #[test]
    fn test_chromaticity_out_of_range() {
        assert!(temperature_to_chromaticity(1000.0).is_none());
        assert!(temperature_to_chromaticity(25000.0).is_none());
        assert!(temperature_to_chromaticity(40000.0).is_none());
    }

    #[test]
    fn test_xyz_to_srgb_white_point() {
        // D65 white at Y = 1 maps to equal channels
        let rgb = xyz_to_linear_srgb(chromaticity_to_xyz(0.3127, 0.3290));
        assert!((rgb.0 - 1.0).abs() < 1e-3);
        assert!((rgb.1 - 1.0).abs() < 1e-3);
        assert!((rgb.2 - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_range_bv_fails_deterministically() {
        for bv in [-1.0, 3.0, 4.5] {
            let first = ColorConverter::default().convert(Some(bv));
            let second = ColorConverter::default().convert(Some(bv));
            assert!(first.is_err(), "bv {} should be rejected", bv);
            assert_eq!(first, second);
            let err = first.unwrap_err();
            assert_eq!(err.bv, bv);
            assert!(err.temperature < 1667.0 || err.temperature >= 25000.0);
        }
    }

    #[test]
    fn test_local_normalization_peaks_at_one() {
        let converter = ColorConverter::default();
        for i in -3..20 {
            let bv = i as f64 * 0.1;
            let rgb = converter.convert(Some(bv)).unwrap();
            assert_eq!(rgb.max_channel(), 1.0, "bv {} -> {}", bv, rgb);
            assert!(rgb.is_unit_range(), "bv {} -> {}", bv, rgb);
        }
    }

    #[test]
    fn test_hot_star_is_blue_cool_star_is_red() {
        let converter = ColorConverter::default();
        let hot = converter.convert(Some(-0.2)).unwrap();
        assert_eq!(hot.2, 1.0);
        assert!(hot.0 < hot.2);

        let cool = converter.convert(Some(1.6)).unwrap();
        assert_eq!(cool.0, 1.0);
        assert!(cool.2 < cool.0);
    }

    #[test]
    fn test_coolest_star_blue_is_clamped() {
        // Near 1667 K the matrix drives blue slightly negative.
        let bv = 2.65;
        let t = bv_to_temperature(bv);
        assert!((1667.0..2222.0).contains(&t), "T = {}", t);
        let rgb = bv_to_linear_rgb(bv).unwrap();
        assert_eq!(rgb.2, 0.0);
        assert!(rgb.0 > 1.0);
    }

    #[test]
    fn test_rounding_to_four_digits() {
        let converter = ColorConverter::default();
        let rgb = converter.convert(Some(0.65)).unwrap();
        for c in [rgb.0, rgb.1, rgb.2] {
            assert!(((c * 1e4).round() - c * 1e4).abs() < 1e-6, "{} not rounded", c);
        }
    }

    #[test]
    fn test_without_local_normalization() {
        let converter = ColorConverter::new(false, 4, Rgb::DEFAULT_STAR);
        let raw = bv_to_linear_rgb(0.65).unwrap();
        let rgb = converter.convert(Some(0.65)).unwrap();
        assert!((rgb.0 - raw.0).abs() < 6e-5);
        assert!((rgb.1 - raw.1).abs() < 6e-5);
        assert!((rgb.2 - raw.2).abs() < 6e-5);
    }
}
