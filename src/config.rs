//! Configuration for the tonefilter tools.
//!
//! The engines take plain numbers; this module is the serde/TOML layer the
//! command-line tools use to describe filter chains and tone detectors.
//!
//! ```
//! use tonefilter::config::PipelineConfig;
//!
//! let config: PipelineConfig = r#"
//!     [[filters]]
//!     kind = "second_order_low_pass"
//!     cutoff = 0.1
//!     q = 0.707
//!
//!     [detector]
//!     frequency = 1000.0
//!     block_len = 256
//! "#
//! .parse()
//! .unwrap();
//! assert_eq!(config.filters.len(), 1);
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{FilterError, Result};
use crate::signal_processing::{
    Filter, FirFilter, GoertzelDetector, IirFilter, apply_blackman_harris,
};

/// Frequency in Hz
///
/// # Parsing formats
/// - `1000` - frequency in Hz (no suffix)
/// - `1000hz` or `1000Hz` - frequency in Hz (explicit)
/// - `1.5khz` or `1.5kHz` - frequency in kHz
///
/// # Example
/// ```
/// use tonefilter::config::Frequency;
///
/// let freq: Frequency = "1.5kHz".parse().unwrap();
/// assert!((freq.as_hz() - 1500.0).abs() < 1e-9);
/// assert!((freq.normalized(48000.0) - 0.03125).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency(f64);

impl Frequency {
    /// Create from frequency in Hz
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    /// Get frequency in Hz
    pub fn as_hz(&self) -> f64 {
        self.0
    }

    /// Frequency in cycles per sample, as the design constructors expect
    pub fn normalized(&self, sample_rate: f64) -> f64 {
        self.0 / sample_rate
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}hz", self.0)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();

        let (num, scale) = if let Some(num) = lower.strip_suffix("khz") {
            (num, 1000.0)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency: {}", s))?;
        if !(value.is_finite() && value > 0.0) {
            return Err("frequency must be positive".to_string());
        }
        Ok(Self::from_hz(value * scale))
    }
}

/// Window applied to raw FIR coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Four-term Blackman-Harris taper
    BlackmanHarris,
}

/// IIR design selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FilterKind {
    /// First-order low-pass (bilinear transform)
    FirstOrderLowPass,
    /// First-order high-pass (bilinear transform)
    FirstOrderHighPass,
    /// First-order low-pass (impulse invariant)
    FirstOrderLowPassExp,
    /// First-order high-pass (impulse invariant)
    FirstOrderHighPassExp,
    /// Biquad low-pass
    SecondOrderLowPass,
    /// Biquad high-pass
    SecondOrderHighPass,
    /// Biquad band-pass
    SecondOrderBandPass,
}

/// One filter stage, as written in a pipeline TOML file
///
/// Cutoffs are normalized to the sample rate (cycles per sample).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterDesign {
    /// Raw FIR taps, optionally windowed
    Fir {
        coefficients: Vec<f64>,
        #[serde(default)]
        window: Option<WindowKind>,
    },
    /// Raw IIR coefficient sets
    Iir { b: Vec<f64>, a: Vec<f64> },
    FirstOrderLowPass { cutoff: f64 },
    FirstOrderHighPass { cutoff: f64 },
    FirstOrderLowPassExp { cutoff: f64 },
    FirstOrderHighPassExp { cutoff: f64 },
    SecondOrderLowPass { cutoff: f64, q: f64 },
    SecondOrderHighPass { cutoff: f64, q: f64 },
    SecondOrderBandPass { cutoff: f64, q: f64 },
}

impl FilterDesign {
    /// Build a design from a command-line kind; `q` is ignored by first-order kinds
    pub fn from_kind(kind: FilterKind, cutoff: f64, q: f64) -> Self {
        match kind {
            FilterKind::FirstOrderLowPass => Self::FirstOrderLowPass { cutoff },
            FilterKind::FirstOrderHighPass => Self::FirstOrderHighPass { cutoff },
            FilterKind::FirstOrderLowPassExp => Self::FirstOrderLowPassExp { cutoff },
            FilterKind::FirstOrderHighPassExp => Self::FirstOrderHighPassExp { cutoff },
            FilterKind::SecondOrderLowPass => Self::SecondOrderLowPass { cutoff, q },
            FilterKind::SecondOrderHighPass => Self::SecondOrderHighPass { cutoff, q },
            FilterKind::SecondOrderBandPass => Self::SecondOrderBandPass { cutoff, q },
        }
    }

    /// Construct the recursive filter this design describes
    ///
    /// # Errors
    /// Returns `FilterError::InvalidArgument` for FIR designs or invalid parameters
    pub fn build_iir(&self) -> Result<IirFilter> {
        match *self {
            Self::Fir { .. } => Err(FilterError::InvalidArgument(
                "FIR design has no IIR form".to_string(),
            )),
            Self::Iir { ref b, ref a } => IirFilter::new(b, a),
            Self::FirstOrderLowPass { cutoff } => IirFilter::first_order_low_pass(cutoff),
            Self::FirstOrderHighPass { cutoff } => IirFilter::first_order_high_pass(cutoff),
            Self::FirstOrderLowPassExp { cutoff } => IirFilter::first_order_low_pass_exp(cutoff),
            Self::FirstOrderHighPassExp { cutoff } => {
                IirFilter::first_order_high_pass_exp(cutoff)
            }
            Self::SecondOrderLowPass { cutoff, q } => IirFilter::second_order_low_pass(cutoff, q),
            Self::SecondOrderHighPass { cutoff, q } => {
                IirFilter::second_order_high_pass(cutoff, q)
            }
            Self::SecondOrderBandPass { cutoff, q } => {
                IirFilter::second_order_band_pass(cutoff, q)
            }
        }
    }

    /// Construct the filter this design describes
    pub fn build(&self) -> Result<Box<dyn Filter>> {
        match self {
            Self::Fir {
                coefficients,
                window,
            } => {
                let taps = match window {
                    Some(WindowKind::BlackmanHarris) => apply_blackman_harris(coefficients),
                    None => coefficients.clone(),
                };
                Ok(Box::new(FirFilter::new(&taps)?))
            }
            _ => Ok(Box::new(self.build_iir()?)),
        }
    }
}

/// Goertzel tone detector configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectorConfig {
    /// Target frequency in Hz
    pub frequency: f64,
    /// Samples per detection block
    pub block_len: usize,
}

impl DetectorConfig {
    pub fn build(&self, sample_rate: f64) -> Result<GoertzelDetector> {
        GoertzelDetector::new(self.frequency, sample_rate, self.block_len)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            frequency: 1000.0,
            block_len: 256,
        }
    }
}

/// Filter chain plus optional tone detector
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PipelineConfig {
    /// Filter stages, applied in order
    #[serde(default)]
    pub filters: Vec<FilterDesign>,
    /// Tone detector run on the chain output
    pub detector: Option<DetectorConfig>,
}

impl PipelineConfig {
    /// Read a pipeline from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        content.parse()
    }

    /// Build every filter stage in order
    pub fn build_filters(&self) -> Result<Vec<Box<dyn Filter>>> {
        self.filters.iter().map(FilterDesign::build).collect()
    }
}

impl FromStr for PipelineConfig {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FilterError::Config(e.to_string()))
    }
}
