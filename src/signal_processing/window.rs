use std::f64::consts::PI;

const BLACKMAN_HARRIS: [f64; 4] = [0.35875, 0.48829, 0.14128, 0.01168];

/// Four-term Blackman-Harris window of length `n`
///
/// Symmetric form (`x = 2*pi*i / (n - 1)`), so the endpoints match. A
/// single-point window is `[1.0]`.
pub fn blackman_harris(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }

    let [a0, a1, a2, a3] = BLACKMAN_HARRIS;
    let span = (n.saturating_sub(1)) as f64;
    (0..n)
        .map(|i| {
            let x = 2.0 * PI * i as f64 / span;
            a0 - a1 * x.cos() + a2 * (2.0 * x).cos() - a3 * (3.0 * x).cos()
        })
        .collect()
}

/// Taper FIR coefficients with a Blackman-Harris window of matching length
pub fn apply_blackman_harris(coefficients: &[f64]) -> Vec<f64> {
    coefficients
        .iter()
        .zip(blackman_harris(coefficients.len()))
        .map(|(c, w)| c * w)
        .collect()
}
