//! Brightness normalization of star colors.
//!
//! Two independent passes:
//!
//! - [`normalize_local`] scales one color so its brightest channel is 1.
//! - [`normalize_global`] scales every color in a population by the same
//!   factor so the brightest channel of the whole population is 1.
//!
//! When both are enabled, local runs during per-star conversion and global
//! runs once over the sorted population.

use super::color::Rgb;
use crate::export::OutputStarRecord;

/// Scales `rgb` so its maximum channel is exactly 1.
///
/// A color with no positive channel is returned unchanged.
pub fn normalize_local(rgb: Rgb) -> Rgb {
    let max = rgb.max_channel();
    if max <= 0.0 {
        return rgb;
    }
    rgb.map(|c| c / max)
}

/// Rescales every star's color by `1 / max(channel over all stars)`.
///
/// Colors are re-rounded to `significant_digits` afterwards. Returns the
/// divisor used, or `None` when the population is empty or entirely black.
pub fn normalize_global(stars: &mut [OutputStarRecord], significant_digits: u32) -> Option<f64> {
    let max = stars
        .iter()
        .map(|s| s.c.max_channel())
        .fold(f64::NEG_INFINITY, f64::max);
    if stars.is_empty() || max <= 0.0 {
        return None;
    }
    for star in stars.iter_mut() {
        star.c = round_rgb(star.c.map(|c| c / max), significant_digits);
    }
    Some(max)
}

/// Rounds `value` to `digits` decimal places.
///
/// Rounds the exact binary value, so `0.56785` (stored just below the
/// midpoint) goes down to `0.5678`.
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    format!("{:.*}", digits as usize, value)
        .parse()
        .unwrap_or(value)
}

pub fn round_rgb(rgb: Rgb, digits: u32) -> Rgb {
    rgb.map(|c| round_to_digits(c, digits))
}
