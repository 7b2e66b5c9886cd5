use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{FilterError, Result};

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Mean square value of `signal`, `0.0` for an empty slice
pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

/// Add zero-mean Gaussian noise with standard deviation `std_dev`
///
/// The same `seed` always yields the same noise; `None` draws from the OS.
pub fn add_white_noise(signal: &mut [f64], std_dev: f64, seed: Option<u64>) -> Result<()> {
    if !(std_dev >= 0.0 && std_dev.is_finite()) {
        return Err(FilterError::InvalidArgument(format!(
            "noise std_dev must be non-negative and finite, got {}",
            std_dev
        )));
    }
    let normal = Normal::new(0.0, std_dev).map_err(|e| {
        FilterError::InvalidArgument(format!("noise std_dev {}: {}", std_dev, e))
    })?;
    let mut rng = create_rng(seed);

    for sample in signal.iter_mut() {
        *sample += normal.sample(&mut rng);
    }
    Ok(())
}

/// Add Gaussian noise scaled so the result has the given SNR in dB
///
/// A silent signal is left untouched.
pub fn add_noise_snr(signal: &mut [f64], snr_db: f64, seed: Option<u64>) -> Result<()> {
    let power = signal_power(signal);
    if power == 0.0 {
        return Ok(());
    }
    let noise_power = power / 10.0_f64.powf(snr_db / 10.0);
    add_white_noise(signal, noise_power.sqrt(), seed)
}
