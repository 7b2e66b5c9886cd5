use std::f64::consts::PI;

use crate::error::{FilterError, Result};

/// Single-bin tone detector using the Goertzel recurrence
///
/// Estimates the amplitude of one frequency over a fixed block of `total_n`
/// samples without computing a full spectrum. The target frequency is snapped
/// to the nearest bin `k = round(total_n * freq / sample_rate)`.
///
/// The detector is not a sliding window: after `total_n` samples it is
/// complete and rejects further input until [`reset`](Self::reset) is called.
#[derive(Debug, Clone)]
pub struct GoertzelDetector {
    k: usize,
    w: f64,
    cos_w: f64,
    sin_w: f64,
    coeff: f64,
    q1: f64,
    q2: f64,
    n: usize,
    total_n: usize,
}

impl GoertzelDetector {
    /// Create a detector for `freq` Hz over blocks of `total_n` samples
    ///
    /// # Arguments
    /// * `freq` - Target frequency in Hz (must be below Nyquist)
    /// * `sample_rate` - Sample rate in Hz
    /// * `total_n` - Block length in samples
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` if any parameter is non-positive
    /// or `freq` is at or above `sample_rate / 2`
    pub fn new(freq: f64, sample_rate: f64, total_n: usize) -> Result<Self> {
        if freq.is_nan() || freq <= 0.0 {
            return Err(invalid_parameter("freq", freq, "frequency must be positive"));
        }
        if sample_rate.is_nan() || sample_rate <= 0.0 || sample_rate.is_infinite() {
            return Err(invalid_parameter(
                "sample_rate",
                sample_rate,
                "sample rate must be positive",
            ));
        }
        if total_n == 0 {
            return Err(invalid_parameter(
                "total_n",
                0.0,
                "total samples must be positive",
            ));
        }
        if freq >= sample_rate / 2.0 {
            return Err(invalid_parameter(
                "freq",
                freq,
                "frequency must be less than Nyquist frequency (sample_rate/2)",
            ));
        }

        let bin = (total_n as f64 * freq / sample_rate).round() as usize;
        let k = if bin >= total_n {
            log::warn!("Goertzel bin {} clamped to {}", bin, total_n - 1);
            total_n - 1
        } else {
            bin
        };

        let w = 2.0 * PI * k as f64 / total_n as f64;
        let (sin_w, cos_w) = w.sin_cos();
        log::debug!(
            "Goertzel detector: freq={} Hz, sample_rate={} Hz, N={}, k={}",
            freq,
            sample_rate,
            total_n,
            k
        );

        Ok(Self {
            k,
            w,
            cos_w,
            sin_w,
            coeff: 2.0 * cos_w,
            q1: 0.0,
            q2: 0.0,
            n: 0,
            total_n,
        })
    }

    /// Feed one sample into the resonator
    ///
    /// # Errors
    /// Returns `FilterError::InvalidState` once `total_n` samples have been
    /// processed
    pub fn process(&mut self, sample: f64) -> Result<()> {
        if self.n >= self.total_n {
            return Err(FilterError::InvalidState(
                "all samples have already been processed".to_string(),
            ));
        }

        let q0 = sample + self.coeff * self.q1 - self.q2;
        self.q2 = self.q1;
        self.q1 = q0;
        self.n += 1;

        Ok(())
    }

    /// Feed a block of samples, stopping at the first error
    pub fn process_buffer(&mut self, samples: &[f64]) -> Result<()> {
        samples.iter().try_for_each(|&x| self.process(x))
    }

    /// Clear the resonator state for a new block; the target bin is kept
    pub fn reset(&mut self) {
        self.q1 = 0.0;
        self.q2 = 0.0;
        self.n = 0;
    }

    /// Amplitude at the target bin, from `q1^2 + q2^2 - coeff*q1*q2`
    ///
    /// Scaled by `2 / total_n`, so a full block of a bin-centred sinusoid of
    /// amplitude `A` reports `A`.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidState` if no sample has been processed
    pub fn magnitude(&self) -> Result<f64> {
        self.ensure_started()?;

        let magnitude_squared =
            self.q1 * self.q1 + self.q2 * self.q2 - self.coeff * self.q1 * self.q2;
        // Rounding can push a near-zero result slightly negative
        let magnitude_squared = magnitude_squared.max(0.0);

        Ok(self.scale(magnitude_squared))
    }

    /// Amplitude at the target bin, from the real/imaginary decomposition
    ///
    /// Algebraically equal to [`magnitude`](Self::magnitude):
    /// `re = q1 - q2*cos(w)`, `im = q2*sin(w)`.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidState` if no sample has been processed
    pub fn magnitude_optimized(&self) -> Result<f64> {
        self.ensure_started()?;

        let re = self.q1 - self.q2 * self.cos_w;
        let im = self.q2 * self.sin_w;

        Ok(self.scale(re * re + im * im))
    }

    /// Signal power at the target bin, `magnitude^2 / 2`
    ///
    /// # Errors
    /// Returns `FilterError::InvalidState` if no sample has been processed
    pub fn power(&self) -> Result<f64> {
        let magnitude = self.magnitude()?;
        Ok(magnitude * magnitude / 2.0)
    }

    /// True once the full block has been processed
    pub fn is_complete(&self) -> bool {
        self.n >= self.total_n
    }

    /// Number of samples processed in the current block
    pub fn processed_count(&self) -> usize {
        self.n
    }

    /// Frequency of the selected bin in Hz at `sample_rate`
    pub fn target_frequency(&self, sample_rate: f64) -> f64 {
        self.k as f64 * sample_rate / self.total_n as f64
    }

    /// Selected bin index `k`
    pub fn coefficient(&self) -> usize {
        self.k
    }

    /// Angular frequency of the selected bin in radians per sample
    pub fn angular_frequency(&self) -> f64 {
        self.w
    }

    /// Block length in samples
    pub fn block_len(&self) -> usize {
        self.total_n
    }

    fn ensure_started(&self) -> Result<()> {
        if self.n == 0 {
            return Err(FilterError::InvalidState(
                "no samples have been processed yet".to_string(),
            ));
        }
        Ok(())
    }

    fn scale(&self, magnitude_squared: f64) -> f64 {
        2.0 * magnitude_squared.sqrt() / self.total_n as f64
    }
}

fn invalid_parameter(param: &str, value: f64, reason: &str) -> FilterError {
    FilterError::InvalidArgument(format!("{} = {}: {}", param, value, reason))
}
