//! Numeric constants for filter construction and analysis
//!
//! These thresholds decide when a value is treated as exact and when a
//! computation is considered too close to a singularity to be meaningful.

/// Tolerance for treating the leading feedback coefficient `a[0]` as 1.
/// Coefficient sets outside this tolerance are rescaled by `a[0]`.
pub const NORMALIZATION_EPSILON: f64 = 1e-10;

/// Response magnitude below which group delay is reported as zero.
/// Near a null the phase derivative is dominated by rounding noise.
pub const NULL_RESPONSE_EPSILON: f64 = 1e-12;

/// Normalized frequency of the Nyquist limit (cycles per sample).
pub const NYQUIST_NORMALIZED: f64 = 0.5;

/// Floor used when converting magnitudes to decibels.
pub const MIN_DB_MAGNITUDE: f64 = 1e-20;
