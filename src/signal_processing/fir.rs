use super::filter::Filter;
use super::ring_buffer::RingBuffer;
use crate::error::{FilterError, Result};

/// Finite impulse response filter
///
/// Convolves the input stream with a fixed set of tap coefficients. The
/// newest sample pairs with `coefficients[0]`, so an impulse reproduces the
/// coefficients in order.
#[derive(Debug, Clone)]
pub struct FirFilter {
    taps: Vec<f64>,
    delay_line: RingBuffer,
}

impl FirFilter {
    /// Create a new FIR filter with the given tap coefficients
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` if `coefficients` is empty
    pub fn new(coefficients: &[f64]) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(FilterError::InvalidArgument(
                "FIR coefficients cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            delay_line: RingBuffer::new(coefficients.len()),
            taps: coefficients.to_vec(),
        })
    }

    /// Copy of the tap coefficients
    pub fn coefficients(&self) -> Vec<f64> {
        self.taps.clone()
    }

    /// Length of the delay line (equal to the number of taps)
    pub fn buffer_size(&self) -> usize {
        self.delay_line.capacity()
    }

    /// Borrow the tap coefficients without copying
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }
}

impl Filter for FirFilter {
    fn tick(&mut self, sample: f64) -> f64 {
        self.delay_line.push(sample);

        self.taps
            .iter()
            .zip(self.delay_line.iter_newest_first())
            .map(|(tap, x)| tap * x)
            .sum()
    }

    fn reset(&mut self) {
        self.delay_line.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_coefficients_rejected() {
        let result = FirFilter::new(&[]);
        assert!(matches!(result, Err(FilterError::InvalidArgument(_))));
    }

    #[test]
    fn test_impulse_response_reproduces_taps() {
        let mut filter = FirFilter::new(&[1.0, 2.0, 3.0]).unwrap();
        let output = filter.process(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(output, vec![1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_one_sample_delay() {
        let mut filter = FirFilter::new(&[0.0, 1.0, 0.0, 0.0]).unwrap();
        let input = [0.5, -0.3, 0.7, -0.2, 0.1, 0.6];
        let output = filter.process(&input);
        assert_eq!(output[0], 0.0);
        for i in 1..input.len() {
            assert_abs_diff_eq!(output[i], input[i - 1], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_moving_average_taps() {
        let mut filter = FirFilter::new(&[0.25; 4]).unwrap();
        let output = filter.process(&[4.0; 8]);
        assert_abs_diff_eq!(output[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(output[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(output[2], 3.0, epsilon = 1e-12);
        for &y in &output[3..] {
            assert_abs_diff_eq!(y, 4.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_tap_is_gain() {
        let mut filter = FirFilter::new(&[2.5]).unwrap();
        assert_eq!(filter.process(&[1.0, -2.0, 0.5]), vec![2.5, -5.0, 1.25]);
        assert_eq!(filter.buffer_size(), 1);
    }

    #[test]
    fn test_zero_taps_output_zero() {
        let mut filter = FirFilter::new(&[0.0, 0.0, 0.0]).unwrap();
        assert!(filter.process(&[1.0, 2.0, 3.0, 4.0]).iter().all(|&y| y == 0.0));
    }

    #[test]
    fn test_reset_matches_fresh_filter() {
        let taps = [0.2, -0.5, 0.9, 0.1];
        let input = [1.0, 0.3, -0.7, 2.0, 0.0, -1.1, 0.4];

        let mut used = FirFilter::new(&taps).unwrap();
        used.process(&[9.0, -4.0, 3.0]);
        used.reset();

        let mut fresh = FirFilter::new(&taps).unwrap();
        assert_eq!(used.process(&input), fresh.process(&input));
    }

    #[test]
    fn test_batch_matches_ticks() {
        let taps = [0.1, 0.2, 0.3, 0.4, 0.5];
        let input: Vec<f64> = (0..20).map(|i| (i as f64 * 0.37).sin()).collect();

        let mut batch = FirFilter::new(&taps).unwrap();
        let mut single = FirFilter::new(&taps).unwrap();
        let expected: Vec<f64> = input.iter().map(|&x| single.tick(x)).collect();
        assert_eq!(batch.process(&input), expected);
    }

    #[test]
    fn test_coefficients_are_copied() {
        let filter = FirFilter::new(&[1.0, 2.0]).unwrap();
        let mut coeffs = filter.coefficients();
        coeffs[0] = 99.0;
        assert_eq!(filter.coefficients(), vec![1.0, 2.0]);
    }
}
