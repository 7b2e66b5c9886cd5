use num_complex::Complex64;

use super::math::normalize_phase;
use crate::error::{FilterError, Result};

const DEFAULT_ALPHA: f64 = 0.1;

/// Coherent phase detector with a first-order loop filter
///
/// Measures the phase of each complex input against a unit-normalized
/// reference, smooths the difference with a single-pole filter, and reports
/// it relative to an adjustable phase offset. All angles are in radians and
/// wrapped to `(-PI, PI]`.
#[derive(Debug, Clone)]
pub struct CoherentPhaseDetector {
    reference: Complex64,
    phase_offset: f64,
    alpha: f64,
    filtered_error: f64,
}

impl CoherentPhaseDetector {
    /// Create a detector locked to `reference`
    ///
    /// `alpha` is the loop-filter coefficient in `(0, 1]`; values outside
    /// that range fall back to 0.1.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` if `reference` has zero magnitude
    pub fn new(reference: Complex64, alpha: f64) -> Result<Self> {
        let alpha = if alpha > 0.0 && alpha <= 1.0 {
            alpha
        } else {
            log::warn!(
                "Phase detector alpha {} out of range (0, 1], using {}",
                alpha,
                DEFAULT_ALPHA
            );
            DEFAULT_ALPHA
        };

        Ok(Self {
            reference: unit(reference, "reference")?,
            phase_offset: 0.0,
            alpha,
            filtered_error: 0.0,
        })
    }

    /// Measure one input sample and return the corrected phase error
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` if `input` has zero magnitude
    pub fn detect(&mut self, input: Complex64) -> Result<f64> {
        let input = unit(input, "input")?;
        let diff = normalize_phase(input.arg() - self.reference.arg());

        self.filtered_error = self.alpha * diff + (1.0 - self.alpha) * self.filtered_error;

        Ok(normalize_phase(self.filtered_error - self.phase_offset))
    }

    /// Fold the filtered error into the offset and restart the loop filter
    pub fn update_offset(&mut self) {
        self.phase_offset += self.filtered_error;
        self.filtered_error = 0.0;
    }

    /// Set the phase offset directly (wrapped into range)
    pub fn set_phase_offset(&mut self, offset: f64) {
        self.phase_offset = normalize_phase(offset);
    }

    /// Replace the reference signal
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` if `reference` has zero magnitude
    pub fn update_reference(&mut self, reference: Complex64) -> Result<()> {
        self.reference = unit(reference, "reference")?;
        Ok(())
    }

    pub fn filtered_error(&self) -> f64 {
        self.filtered_error
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

fn unit(value: Complex64, name: &str) -> Result<Complex64> {
    let magnitude = value.norm();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Err(FilterError::InvalidArgument(format!(
            "{} signal must have finite non-zero magnitude",
            name
        )));
    }
    Ok(value / magnitude)
}
