mod test_signals;

use approx::{assert_abs_diff_eq, assert_relative_eq};

use tonefilter::simulation::{ReferenceSignalGenerator, Waveform, add_white_noise};
use tonefilter::{Filter, FilterError, GoertzelDetector, IirFilter};

const SAMPLE_RATE: f64 = 8000.0;
const BLOCK: usize = 256;

fn detect(freq: f64, signal: &[f64]) -> GoertzelDetector {
    let mut detector = GoertzelDetector::new(freq, SAMPLE_RATE, signal.len()).unwrap();
    detector.process_buffer(signal).unwrap();
    detector
}

#[test]
fn test_bin_centred_tone_amplitude() {
    for amplitude in [0.1, 1.0, 3.5] {
        let signal = test_signals::sine(1000.0, SAMPLE_RATE, BLOCK, amplitude, 0.3);
        let detector = detect(1000.0, &signal);
        assert_relative_eq!(detector.magnitude().unwrap(), amplitude, max_relative = 0.01);
    }
}

#[test]
fn test_far_tones_rejected() {
    for freq in [2537.0, 1700.3, 3100.7, 3000.0] {
        let signal = test_signals::sine(freq, SAMPLE_RATE, BLOCK, 1.0, 0.0);
        let detector = detect(1000.0, &signal);
        let magnitude = detector.magnitude().unwrap();
        assert!(magnitude < 0.05, "{} Hz leaked {}", freq, magnitude);
    }
}

#[test]
fn test_magnitude_formulas_agree() {
    let configs = [(697.0, 205), (1209.0, 205), (1000.0, 256), (2500.0, 100)];
    for (freq, n) in configs {
        let signal = test_signals::mix(&[
            test_signals::sine(freq, SAMPLE_RATE, n, 0.8, 0.1),
            test_signals::sine(1633.0, SAMPLE_RATE, n, 0.4, 1.2),
        ]);
        let mut detector = GoertzelDetector::new(freq, SAMPLE_RATE, n).unwrap();
        // Partial blocks must agree as well
        for (i, &x) in signal.iter().enumerate() {
            detector.process(x).unwrap();
            if i % 37 == 0 {
                assert_abs_diff_eq!(
                    detector.magnitude().unwrap(),
                    detector.magnitude_optimized().unwrap(),
                    epsilon = 1e-10
                );
            }
        }
        assert_abs_diff_eq!(
            detector.magnitude().unwrap(),
            detector.magnitude_optimized().unwrap(),
            epsilon = 1e-10
        );
    }
}

#[test]
fn test_generated_reference_tone() {
    let signal = ReferenceSignalGenerator::new(1000.0, SAMPLE_RATE, BLOCK as f64 / SAMPLE_RATE)
        .with_waveform(Waveform::Cosine)
        .with_amplitude(0.5)
        .generate()
        .unwrap();
    assert_eq!(signal.len(), BLOCK);
    assert_relative_eq!(detect(1000.0, &signal).magnitude().unwrap(), 0.5, max_relative = 0.01);
}

#[test]
fn test_tone_in_noise() {
    let mut signal = test_signals::sine(1000.0, SAMPLE_RATE, BLOCK, 1.0, 0.0);
    add_white_noise(&mut signal, 0.1, Some(42)).unwrap();
    assert_relative_eq!(detect(1000.0, &signal).magnitude().unwrap(), 1.0, max_relative = 0.05);

    let mut quiet = vec![0.0; BLOCK];
    add_white_noise(&mut quiet, 0.1, Some(43)).unwrap();
    assert!(detect(1000.0, &quiet).magnitude().unwrap() < 0.05);
}

#[test]
fn test_band_pass_then_detect() {
    let signal = test_signals::mix(&[
        test_signals::sine(1000.0, SAMPLE_RATE, 3 * BLOCK, 1.0, 0.0),
        test_signals::sine(3000.0, SAMPLE_RATE, 3 * BLOCK, 1.0, 0.0),
    ]);
    let mut band_pass = IirFilter::second_order_band_pass(1000.0 / SAMPLE_RATE, 5.0).unwrap();
    let filtered = band_pass.process(&signal);
    let settled = &filtered[2 * BLOCK..];

    assert_relative_eq!(detect(1000.0, settled).magnitude().unwrap(), 1.0, max_relative = 0.01);
    assert!(detect(3000.0, settled).magnitude().unwrap() < 0.05);
}

#[test]
fn test_block_budget_and_reset() {
    let signal = test_signals::sine(1000.0, SAMPLE_RATE, 2 * BLOCK, 1.0, 0.0);
    let mut detector = GoertzelDetector::new(1000.0, SAMPLE_RATE, BLOCK).unwrap();

    assert!(matches!(
        detector.process_buffer(&signal),
        Err(FilterError::InvalidState(_))
    ));
    assert!(detector.is_complete());
    assert_eq!(detector.processed_count(), BLOCK);
    let first = detector.magnitude().unwrap();

    detector.reset();
    detector.process_buffer(&signal[BLOCK..]).unwrap();
    assert_relative_eq!(detector.magnitude().unwrap(), first, max_relative = 1e-9);
    assert_relative_eq!(detector.target_frequency(SAMPLE_RATE), 1000.0);
}
