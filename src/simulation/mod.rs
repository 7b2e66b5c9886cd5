mod noise;
mod signal;

pub use noise::{add_noise_snr, add_white_noise, signal_power};
pub use signal::{ReferenceSignalGenerator, Waveform};
