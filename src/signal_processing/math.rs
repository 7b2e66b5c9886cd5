use std::f64::consts::PI;

use crate::constants::MIN_DB_MAGNITUDE;

/// Wrap a phase angle into `(-PI, PI]`
///
/// An input landing exactly on `-PI` is reported as `PI`.
pub fn normalize_phase(phase: f64) -> f64 {
    let wrapped = (phase + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI { PI } else { wrapped }
}

/// Convert a linear amplitude to decibels, flooring silence
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    20.0 * amplitude.abs().max(MIN_DB_MAGNITUDE).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_phase_in_range() {
        assert_abs_diff_eq!(normalize_phase(0.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(-2.0), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_phase_wraps() {
        assert_abs_diff_eq!(normalize_phase(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(7.0 * PI + 0.1), -PI + 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_phase_boundary() {
        assert_eq!(normalize_phase(-PI), PI);
        assert_eq!(normalize_phase(PI), PI);
    }

    #[test]
    fn test_amplitude_to_db() {
        assert_abs_diff_eq!(amplitude_to_db(1.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(amplitude_to_db(0.1), -20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(amplitude_to_db(0.0), -400.0, epsilon = 1e-9);
    }
}
