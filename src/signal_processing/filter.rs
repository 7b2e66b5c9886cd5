/// Common trait for streaming sample filters
///
/// Implemented by `FirFilter` and `IirFilter`. Every batch method is defined
/// in terms of `tick`, so batch and per-sample processing always agree.
pub trait Filter {
    /// Process a single sample through the filter
    fn tick(&mut self, sample: f64) -> f64;

    /// Clear the filter history, keeping its coefficients
    fn reset(&mut self);

    /// Filter a sequence, returning a same-length output sequence
    fn process(&mut self, inputs: &[f64]) -> Vec<f64> {
        inputs.iter().map(|&x| self.tick(x)).collect()
    }

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.tick(*sample);
        }
    }
}

/// Filters applied one after another
///
/// The chain is itself a `Filter`: each sample passes through every stage in
/// order before the next sample is taken.
#[derive(Default)]
pub struct FilterChain {
    stages: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new(stages: Vec<Box<dyn Filter>>) -> Self {
        Self { stages }
    }

    /// Append a stage at the end of the chain
    pub fn push(&mut self, stage: Box<dyn Filter>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Filter for FilterChain {
    fn tick(&mut self, sample: f64) -> f64 {
        self.stages
            .iter_mut()
            .fold(sample, |x, stage| stage.tick(x))
    }

    fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_processing::{FirFilter, IirFilter};

    #[test]
    fn test_empty_chain_passes_through() {
        let mut chain = FilterChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.process(&[1.0, -2.0]), vec![1.0, -2.0]);
    }

    #[test]
    fn test_chain_matches_stages_in_sequence() {
        let input = [1.0, 0.0, 0.5, -1.0, 2.0, 0.0];

        let mut chain = FilterChain::new(vec![
            Box::new(FirFilter::new(&[0.5, 0.5]).unwrap()),
            Box::new(IirFilter::new(&[1.0], &[1.0, -0.5]).unwrap()),
        ]);
        assert_eq!(chain.len(), 2);

        let mut fir = FirFilter::new(&[0.5, 0.5]).unwrap();
        let mut iir = IirFilter::new(&[1.0], &[1.0, -0.5]).unwrap();
        let expected = iir.process(&fir.process(&input));

        assert_eq!(chain.process(&input), expected);

        chain.reset();
        assert_eq!(chain.process(&input), expected);
    }

    #[test]
    fn test_process_buffer_in_place() {
        let mut chain = FilterChain::default();
        chain.push(Box::new(FirFilter::new(&[2.0]).unwrap()));
        let mut buffer = [1.0, 2.0, 3.0];
        chain.process_buffer(&mut buffer);
        assert_eq!(buffer, [2.0, 4.0, 6.0]);
    }
}
