use num_complex::Complex64;
use std::f64::consts::PI;

use super::filter::Filter;
use super::ring_buffer::RingBuffer;
use crate::constants::{NORMALIZATION_EPSILON, NULL_RESPONSE_EPSILON, NYQUIST_NORMALIZED};
use crate::error::{FilterError, Result};

/// Recursive (infinite impulse response) filter in direct form I
///
/// Implements the difference equation
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + ... + b(P-1)*x[n-P+1]
///                - a1*y[n-1] - ... - a(Q-1)*y[n-Q+1]
/// ```
///
/// with input and output histories held in separate ring buffers. The
/// feedback set is normalized at construction so that `a[0] == 1`.
///
/// Coefficients usually come from the design constructors in
/// [`iir_design`](super::iir_design), e.g. [`IirFilter::second_order_low_pass`].
#[derive(Debug, Clone)]
pub struct IirFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    x_history: RingBuffer,
    y_history: RingBuffer,
    order: usize,
}

impl IirFilter {
    /// Create a filter from feedforward (`b`) and feedback (`a`) coefficients
    ///
    /// If `a[0]` differs from 1 by more than the normalization tolerance,
    /// every coefficient is divided by `a[0]`.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` if either set is empty or if
    /// `a[0]` is zero or not finite (no normalization is possible).
    pub fn new(b: &[f64], a: &[f64]) -> Result<Self> {
        if b.is_empty() {
            return Err(FilterError::InvalidArgument(
                "IIR b coefficients cannot be empty".to_string(),
            ));
        }
        if a.is_empty() {
            return Err(FilterError::InvalidArgument(
                "IIR a coefficients cannot be empty".to_string(),
            ));
        }

        let a0 = a[0];
        if a0 == 0.0 || !a0.is_finite() {
            return Err(FilterError::InvalidArgument(format!(
                "IIR a[0] must be finite and non-zero, got {}",
                a0
            )));
        }

        let mut b = b.to_vec();
        let mut a = a.to_vec();
        if (a0 - 1.0).abs() > NORMALIZATION_EPSILON {
            log::debug!("Normalizing IIR coefficients by a[0] = {}", a0);
            b.iter_mut().for_each(|c| *c /= a0);
            a.iter_mut().for_each(|c| *c /= a0);
        }
        a[0] = 1.0;

        let order = b.len().max(a.len()) - 1;

        Ok(Self {
            x_history: RingBuffer::new(b.len()),
            y_history: RingBuffer::new(a.len()),
            b,
            a,
            order,
        })
    }

    /// Filter order, `max(len(b), len(a)) - 1`
    pub fn order(&self) -> usize {
        self.order
    }

    /// Copy of the feedforward coefficients
    pub fn b_coefficients(&self) -> Vec<f64> {
        self.b.clone()
    }

    /// Copy of the normalized feedback coefficients (`a[0] == 1`)
    pub fn a_coefficients(&self) -> Vec<f64> {
        self.a.clone()
    }

    /// Check whether the filter poles lie inside the unit circle
    ///
    /// Exact for orders 0 through 2. Orders above 2 are not analysed and
    /// always report stable; callers building higher-order sections must
    /// verify stability themselves.
    pub fn is_stable(&self) -> bool {
        match self.a.len() {
            0 | 1 => true,
            2 => self.a[1].abs() < 1.0,
            3 => {
                // Stability triangle of 1 + a1*z^-1 + a2*z^-2
                let a1 = self.a[1];
                let a2 = self.a[2];
                a2 < 1.0 && a2 > -1.0 && a2 > -a1 - 1.0 && a2 > a1 - 1.0
            }
            n => {
                log::debug!(
                    "Stability of order {} feedback is not verified; reporting stable",
                    n - 1
                );
                true
            }
        }
    }

    /// Complex frequency response at normalized frequency `freq`
    ///
    /// `freq` is in cycles per sample, `0.0..=0.5` (0.5 is Nyquist). A zero
    /// denominator yields `+inf + 0i` rather than an error.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` if `freq` is outside `[0, 0.5]`
    pub fn response(&self, freq: f64) -> Result<Complex64> {
        let z = unit_circle_point(freq)?;

        let (num, _) = evaluate_polynomial(&self.b, z);
        let (den, _) = evaluate_polynomial(&self.a, z);

        if den == Complex64::new(0.0, 0.0) {
            return Ok(Complex64::new(f64::INFINITY, 0.0));
        }
        Ok(num / den)
    }

    /// Group delay in samples at normalized frequency `freq`
    ///
    /// Computed analytically from the polynomial derivatives:
    /// `Re[z * H'(z) / H(z)]` with `H' = (B'A - BA') / A^2`. Returns 0 where
    /// the response magnitude is below the null threshold, and `+inf` on a
    /// pole of the unit circle.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` if `freq` is outside `[0, 0.5]`
    pub fn group_delay(&self, freq: f64) -> Result<f64> {
        let z = unit_circle_point(freq)?;

        let (num, num_deriv) = evaluate_polynomial(&self.b, z);
        let (den, den_deriv) = evaluate_polynomial(&self.a, z);

        if den == Complex64::new(0.0, 0.0) {
            return Ok(f64::INFINITY);
        }

        let h = num / den;
        if h.norm() < NULL_RESPONSE_EPSILON {
            return Ok(0.0);
        }

        let h_deriv = (num_deriv * den - num * den_deriv) / (den * den);
        Ok((z * h_deriv / h).re)
    }
}

impl Filter for IirFilter {
    fn tick(&mut self, sample: f64) -> f64 {
        self.x_history.push(sample);

        let feedforward: f64 = self
            .b
            .iter()
            .zip(self.x_history.iter_newest_first())
            .map(|(c, x)| c * x)
            .sum();

        // Before the push, the newest output history entry is y[n-1]
        let feedback: f64 = self.a[1..]
            .iter()
            .zip(self.y_history.iter_newest_first())
            .map(|(c, y)| c * y)
            .sum();

        let output = feedforward - feedback;
        self.y_history.push(output);
        output
    }

    fn reset(&mut self) {
        self.x_history.reset();
        self.y_history.reset();
    }
}

/// Map a normalized frequency onto `z = e^(j*2*pi*freq)`
fn unit_circle_point(freq: f64) -> Result<Complex64> {
    if !(0.0..=NYQUIST_NORMALIZED).contains(&freq) {
        return Err(FilterError::InvalidArgument(format!(
            "frequency must be between 0 and {} (Nyquist), got {}",
            NYQUIST_NORMALIZED, freq
        )));
    }
    Ok(Complex64::from_polar(1.0, 2.0 * PI * freq))
}

/// Evaluate `sum c[i] * z^i` and its derivative `sum i * c[i] * z^(i-1)`
fn evaluate_polynomial(coeffs: &[f64], z: Complex64) -> (Complex64, Complex64) {
    let mut value = Complex64::new(0.0, 0.0);
    let mut deriv = Complex64::new(0.0, 0.0);
    let mut z_prev = Complex64::new(0.0, 0.0);
    let mut z_power = Complex64::new(1.0, 0.0);

    for (i, &c) in coeffs.iter().enumerate() {
        value += z_power * c;
        if i > 0 {
            deriv += z_prev * (c * i as f64);
        }
        z_prev = z_power;
        z_power *= z;
    }

    (value, deriv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_empty_coefficients_rejected() {
        assert!(matches!(
            IirFilter::new(&[], &[1.0]),
            Err(FilterError::InvalidArgument(_))
        ));
        assert!(matches!(
            IirFilter::new(&[1.0], &[]),
            Err(FilterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zero_leading_feedback_rejected() {
        assert!(IirFilter::new(&[1.0], &[0.0, 0.5]).is_err());
        assert!(IirFilter::new(&[1.0], &[f64::NAN]).is_err());
    }

    #[test]
    fn test_pure_gain() {
        let mut filter = IirFilter::new(&[0.5], &[1.0]).unwrap();
        assert_eq!(filter.order(), 0);
        assert_eq!(filter.process(&[2.0, -4.0, 1.0]), vec![1.0, -2.0, 0.5]);
    }

    #[test]
    fn test_first_order_impulse_decay() {
        let mut filter = IirFilter::new(&[0.5], &[1.0, 0.3]).unwrap();
        let output = filter.process(&[1.0, 0.0, 0.0, 0.0, 0.0]);
        let expected = [0.5, -0.15, 0.045, -0.0135, 0.00405];
        for (y, e) in output.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*y, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalization_by_a0() {
        let filter = IirFilter::new(&[1.0, 2.0], &[2.0, 0.5, 0.25]).unwrap();
        assert_eq!(filter.a_coefficients()[0], 1.0);
        assert_relative_eq!(filter.b_coefficients()[1], 1.0);
        assert_relative_eq!(filter.a_coefficients()[1], 0.25);
        assert_relative_eq!(filter.a_coefficients()[2], 0.125);
    }

    #[test]
    fn test_normalized_filter_matches_prescaled() {
        let mut scaled = IirFilter::new(&[2.0, 1.0], &[4.0, -2.0]).unwrap();
        let mut unit = IirFilter::new(&[0.5, 0.25], &[1.0, -0.5]).unwrap();
        let input = [1.0, 0.5, -0.25, 0.0, 2.0];
        for (a, b) in scaled.process(&input).iter().zip(unit.process(&input)) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_order_uses_longer_set() {
        let filter = IirFilter::new(&[1.0, 0.5, 0.25, 0.125], &[1.0, -0.2]).unwrap();
        assert_eq!(filter.order(), 3);
        let filter = IirFilter::new(&[1.0], &[1.0, -0.2, 0.1]).unwrap();
        assert_eq!(filter.order(), 2);
    }

    #[test]
    fn test_reset_matches_fresh_filter() {
        let b = [0.2, 0.4, 0.2];
        let a = [1.0, -0.3, 0.1];
        let input = [1.0, -1.0, 0.5, 0.25, 0.0, 3.0];

        let mut used = IirFilter::new(&b, &a).unwrap();
        used.process(&[5.0, 5.0, -2.0, 1.0]);
        used.reset();

        let mut fresh = IirFilter::new(&b, &a).unwrap();
        assert_eq!(used.process(&input), fresh.process(&input));
        assert_eq!(used.b_coefficients(), b.to_vec());
    }

    #[test]
    fn test_stability_first_order() {
        assert!(IirFilter::new(&[1.0], &[1.0, 0.3]).unwrap().is_stable());
        assert!(!IirFilter::new(&[1.0], &[1.0, 1.5]).unwrap().is_stable());
        assert!(!IirFilter::new(&[1.0], &[1.0, -1.0]).unwrap().is_stable());
    }

    #[test]
    fn test_stability_second_order() {
        // Complex poles at radius 0.9
        assert!(IirFilter::new(&[1.0], &[1.0, -1.0, 0.81]).unwrap().is_stable());
        // a2 on the boundary
        assert!(!IirFilter::new(&[1.0], &[1.0, 0.0, 1.0]).unwrap().is_stable());
        // Real pole outside the circle: 1 - 2.5z^-1 + z^-2 has a pole at 2
        assert!(!IirFilter::new(&[1.0], &[1.0, -2.5, 1.0]).unwrap().is_stable());
    }

    #[test]
    fn test_stability_unverified_above_second_order() {
        let filter = IirFilter::new(&[1.0], &[1.0, 5.0, 5.0, 5.0]).unwrap();
        assert!(filter.is_stable());
    }

    #[test]
    fn test_response_rejects_out_of_range() {
        let filter = IirFilter::new(&[1.0], &[1.0, 0.3]).unwrap();
        assert!(filter.response(-0.01).is_err());
        assert!(filter.response(0.51).is_err());
        assert!(filter.response(f64::NAN).is_err());
        assert!(filter.group_delay(0.6).is_err());
        assert!(filter.response(0.5).is_ok());
    }

    #[test]
    fn test_response_of_first_order_section() {
        let filter = IirFilter::new(&[0.5], &[1.0, 0.3]).unwrap();
        let dc = filter.response(0.0).unwrap();
        assert_relative_eq!(dc.re, 0.5 / 1.3, epsilon = 1e-12);
        assert_abs_diff_eq!(dc.im, 0.0, epsilon = 1e-12);
        let nyquist = filter.response(0.5).unwrap();
        assert_relative_eq!(nyquist.norm(), 0.5 / 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_response_zero_denominator() {
        // 1 - z is exactly zero at DC
        let filter = IirFilter::new(&[1.0], &[1.0, -1.0]).unwrap();
        let h = filter.response(0.0).unwrap();
        assert_eq!(h, Complex64::new(f64::INFINITY, 0.0));
        assert_eq!(filter.group_delay(0.0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_group_delay_of_pure_delay() {
        let filter = IirFilter::new(&[0.0, 1.0], &[1.0]).unwrap();
        for freq in [0.0, 0.1, 0.25, 0.4] {
            assert_abs_diff_eq!(filter.group_delay(freq).unwrap(), 1.0, epsilon = 1e-9);
        }
        let filter = IirFilter::new(&[0.0, 0.0, 0.0, 2.0], &[1.0]).unwrap();
        assert_abs_diff_eq!(filter.group_delay(0.2).unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_group_delay_of_one_pole_lowpass_at_dc() {
        // H = b0 / (1 - p z^-1): group delay at DC is p / (1 - p)
        let p = 0.3;
        let filter = IirFilter::new(&[0.5], &[1.0, -p]).unwrap();
        let delay = filter.group_delay(0.0).unwrap();
        assert_relative_eq!(delay, p / (1.0 - p), epsilon = 1e-12);
    }

    #[test]
    fn test_group_delay_at_null_is_zero() {
        // 1 - z^-1 has a null at DC
        let filter = IirFilter::new(&[1.0, -1.0], &[1.0]).unwrap();
        assert_eq!(filter.group_delay(0.0).unwrap(), 0.0);
    }
}
