//! Fixed coefficients of the B-V → linear sRGB chain.
//!
//! - B-V → log10(T): cubic fit, Ballesteros-style polynomial
//! - T → chromaticity x/y: Kim et al. cubic-spline approximation of the Planckian locus
//! - XYZ → linear sRGB: IEC 61966-2-1 matrix (D65)

/// `log10(T) = Σ BV_TEMPERATURE[n] · bv^n`.
pub const BV_TEMPERATURE: [f64; 4] = [3.939654, -0.395361, 0.2082113, -0.0604097];

/// Cubic coefficients valid on the half-open temperature interval `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientRange {
    pub low: f64,
    pub high: f64,
    pub coef: [f64; 4],
}

impl CoefficientRange {
    pub const fn new(low: f64, high: f64, coef: [f64; 4]) -> Self {
        Self { low, high, coef }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value < self.high
    }
}

/// Chromaticity x as a function of `10^3 / T`.
pub const CHROMATICITY_X: [CoefficientRange; 2] = [
    CoefficientRange::new(1667.0, 4000.0, [0.179910, 0.8776956, -0.2343589, -0.2661239]),
    CoefficientRange::new(4000.0, 25000.0, [0.240390, 0.2226347, 2.1070379, -3.0258469]),
];

/// Chromaticity y as a function of x.
pub const CHROMATICITY_Y: [CoefficientRange; 3] = [
    CoefficientRange::new(1667.0, 2222.0, [-0.20219683, 2.18555832, -1.34811020, -1.1063814]),
    CoefficientRange::new(2222.0, 4000.0, [-0.16748867, 2.09137015, -1.37418593, -0.9549476]),
    CoefficientRange::new(4000.0, 25000.0, [-0.37001483, 3.75112997, -5.87338670, 3.0817580]),
];

/// Rows map `[X, Y, Z]` to linear `[R, G, B]`.
pub const XYZ_TO_LINEAR_SRGB: [[f64; 3]; 3] = [
    [3.240970, -1.537383, -0.498611],
    [-0.969244, 1.875968, 0.041555],
    [0.055630, -0.203977, 1.056972],
];

/// First range in `table` whose `[low, high)` interval contains `value`.
///
/// Linear scan, no clamping: a value outside every interval yields `None`.
pub fn select(table: &[CoefficientRange], value: f64) -> Option<&[f64; 4]> {
    table.iter().find(|r| r.contains(value)).map(|r| &r.coef)
}
