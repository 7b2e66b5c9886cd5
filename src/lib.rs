pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod signal_processing;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::PipelineConfig;
pub use error::{FilterError, Result};
pub use signal_processing::{Filter, FilterChain, FirFilter, GoertzelDetector, IirFilter};
pub use wav::{read_wav_mono, save_wav};
