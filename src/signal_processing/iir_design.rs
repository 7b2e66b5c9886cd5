//! Closed-form IIR designs
//!
//! All cutoffs are normalized to the sample rate (cycles per sample) and must
//! lie strictly between 0 and 0.5. Quality factors must be positive.
//!
//! - First-order sections use the bilinear transform with frequency
//!   pre-warping, so the -3 dB point lands exactly on the cutoff.
//! - Second-order sections follow the RBJ audio cookbook biquads.
//! - The `_exp` variants are impulse-invariant one-pole smoothers.

use std::f64::consts::PI;

use super::iir::IirFilter;
use crate::error::{FilterError, Result};

fn validate_cutoff(fc: f64) -> Result<()> {
    if fc > 0.0 && fc < 0.5 {
        Ok(())
    } else {
        Err(FilterError::InvalidArgument(format!(
            "cutoff frequency must be between 0 and 0.5, got {}",
            fc
        )))
    }
}

fn validate_q(q: f64) -> Result<()> {
    if q > 0.0 && q.is_finite() {
        Ok(())
    } else {
        Err(FilterError::InvalidArgument(format!(
            "Q must be positive, got {}",
            q
        )))
    }
}

/// Shared biquad intermediates: `(alpha, cos(w0))`
fn biquad_terms(fc: f64, q: f64) -> Result<(f64, f64)> {
    validate_cutoff(fc)?;
    validate_q(q)?;
    let w0 = 2.0 * PI * fc;
    Ok((w0.sin() / (2.0 * q), w0.cos()))
}

/// Divide a cookbook biquad through by `a0 = 1 + alpha`
fn normalized_biquad(b: [f64; 3], alpha: f64, cos_w0: f64) -> Result<IirFilter> {
    let a0 = 1.0 + alpha;
    let b = [b[0] / a0, b[1] / a0, b[2] / a0];
    let a = [1.0, -2.0 * cos_w0 / a0, (1.0 - alpha) / a0];
    log::debug!("Biquad b={:?} a={:?}", b, a);
    IirFilter::new(&b, &a)
}

impl IirFilter {
    /// First-order low-pass via the bilinear transform
    ///
    /// Unity gain at DC and -3 dB at `fc`.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` unless `0 < fc < 0.5`
    pub fn first_order_low_pass(fc: f64) -> Result<Self> {
        validate_cutoff(fc)?;
        let alpha = (PI * fc).tan();

        let b0 = alpha / (1.0 + alpha);
        let a1 = -(1.0 - alpha) / (1.0 + alpha);
        log::debug!("First-order low-pass fc={}: b0=b1={} a1={}", fc, b0, a1);

        Self::new(&[b0, b0], &[1.0, a1])
    }

    /// First-order high-pass via the bilinear transform
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` unless `0 < fc < 0.5`
    pub fn first_order_high_pass(fc: f64) -> Result<Self> {
        validate_cutoff(fc)?;
        let alpha = (PI * fc).tan();

        let b0 = 1.0 / (1.0 + alpha);
        let a1 = -(1.0 - alpha) / (1.0 + alpha);
        log::debug!("First-order high-pass fc={}: b0={} a1={}", fc, b0, a1);

        Self::new(&[b0, -b0], &[1.0, a1])
    }

    /// First-order low-pass in impulse-invariant (exponential) form
    ///
    /// `y[n] = alpha*x[n] + (1 - alpha)*y[n-1]` with `alpha = 1 - e^(-2*pi*fc)`.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` unless `0 < fc < 0.5`
    pub fn first_order_low_pass_exp(fc: f64) -> Result<Self> {
        validate_cutoff(fc)?;
        let alpha = 1.0 - (-2.0 * PI * fc).exp();
        log::debug!("First-order low-pass (exp) fc={}: b0={} a1={}", fc, alpha, alpha - 1.0);

        Self::new(&[alpha], &[1.0, -(1.0 - alpha)])
    }

    /// First-order high-pass in impulse-invariant (exponential) form
    ///
    /// Shares the pole of [`first_order_low_pass_exp`](Self::first_order_low_pass_exp),
    /// with a zero at DC and `b0 = (1 + alpha) / 2`.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` unless `0 < fc < 0.5`
    pub fn first_order_high_pass_exp(fc: f64) -> Result<Self> {
        validate_cutoff(fc)?;
        let alpha = 1.0 - (-2.0 * PI * fc).exp();

        let b0 = (1.0 + alpha) / 2.0;
        log::debug!("First-order high-pass (exp) fc={}: b0={} a1={}", fc, b0, alpha - 1.0);

        Self::new(&[b0, -b0], &[1.0, -(1.0 - alpha)])
    }

    /// Second-order (biquad) low-pass
    ///
    /// `q = 1/sqrt(2)` gives a Butterworth response.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` unless `0 < fc < 0.5` and `q > 0`
    pub fn second_order_low_pass(fc: f64, q: f64) -> Result<Self> {
        let (alpha, cos_w0) = biquad_terms(fc, q)?;
        let b1 = 1.0 - cos_w0;
        normalized_biquad([b1 / 2.0, b1, b1 / 2.0], alpha, cos_w0)
    }

    /// Second-order (biquad) high-pass
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` unless `0 < fc < 0.5` and `q > 0`
    pub fn second_order_high_pass(fc: f64, q: f64) -> Result<Self> {
        let (alpha, cos_w0) = biquad_terms(fc, q)?;
        let b0 = (1.0 + cos_w0) / 2.0;
        normalized_biquad([b0, -(1.0 + cos_w0), b0], alpha, cos_w0)
    }

    /// Second-order (biquad) band-pass with 0 dB peak gain at `fc`
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` unless `0 < fc < 0.5` and `q > 0`
    pub fn second_order_band_pass(fc: f64, q: f64) -> Result<Self> {
        let (alpha, cos_w0) = biquad_terms(fc, q)?;
        normalized_biquad([alpha, 0.0, -alpha], alpha, cos_w0)
    }
}
