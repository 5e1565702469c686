//! Photometric color derivation.
//!
//! - [`coefficients`]: fixed polynomial, piecewise, and matrix coefficients
//! - [`color`]: B-V → temperature → chromaticity → XYZ → linear sRGB
//! - [`normalize`]: per-star and population-wide brightness normalization

pub mod coefficients;
pub mod color;
pub mod normalize;

pub use color::{bv_to_linear_rgb, bv_to_temperature, ColorConverter, ColorOutOfRange, Rgb};
pub use normalize::{normalize_global, normalize_local, round_to_digits};
