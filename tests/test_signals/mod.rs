#![allow(dead_code)]

use std::f64::consts::PI;

/// `n` samples of `amplitude * sin(2π·freq·t + phase)`
pub fn sine(freq: f64, sample_rate: f64, n: usize, amplitude: f64, phase: f64) -> Vec<f64> {
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq * i as f64 / sample_rate + phase).sin())
        .collect()
}

/// Sum of equal-length signals
pub fn mix(signals: &[Vec<f64>]) -> Vec<f64> {
    let len = signals.iter().map(Vec::len).min().unwrap_or(0);
    (0..len).map(|i| signals.iter().map(|s| s[i]).sum()).collect()
}

/// Unit impulse of length `n`
pub fn impulse(n: usize) -> Vec<f64> {
    let mut signal = vec![0.0; n];
    if n > 0 {
        signal[0] = 1.0;
    }
    signal
}
