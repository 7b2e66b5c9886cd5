use std::f64::consts::PI;
use std::fmt;

use crate::error::{FilterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Cosine,
    Square,
    Sawtooth,
    Triangle,
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Waveform::Sine => "sine",
            Waveform::Cosine => "cosine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

/// Deterministic test waveform source
///
/// `phase` is in radians; for the piecewise waveforms it shifts the cycle by
/// `phase / 2π` periods. `duty_cycle` only affects [`Waveform::Square`].
#[derive(Debug, Clone)]
pub struct ReferenceSignalGenerator {
    pub frequency: f64,
    pub sample_rate: f64,
    /// Seconds
    pub duration: f64,
    pub amplitude: f64,
    pub phase: f64,
    pub waveform: Waveform,
    pub duty_cycle: f64,
}

impl Default for ReferenceSignalGenerator {
    fn default() -> Self {
        Self {
            frequency: 1000.0,
            sample_rate: 8000.0,
            duration: 1.0,
            amplitude: 1.0,
            phase: 0.0,
            waveform: Waveform::Sine,
            duty_cycle: 0.5,
        }
    }
}

impl ReferenceSignalGenerator {
    pub fn new(frequency: f64, sample_rate: f64, duration: f64) -> Self {
        Self {
            frequency,
            sample_rate,
            duration,
            ..Self::default()
        }
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_duty_cycle(mut self, duty_cycle: f64) -> Self {
        self.duty_cycle = duty_cycle;
        self
    }

    /// Number of samples [`generate`](Self::generate) produces
    pub fn sample_count(&self) -> usize {
        (self.duration * self.sample_rate).round() as usize
    }

    pub fn generate(&self) -> Result<Vec<f64>> {
        self.validate()?;

        let omega = 2.0 * PI * self.frequency;
        let cycle_offset = self.phase / (2.0 * PI);

        let samples = (0..self.sample_count())
            .map(|i| {
                let t = i as f64 / self.sample_rate;
                let cycle = self.frequency * t + cycle_offset;
                let frac = cycle - cycle.floor();
                match self.waveform {
                    Waveform::Sine => self.amplitude * (omega * t + self.phase).sin(),
                    Waveform::Cosine => self.amplitude * (omega * t + self.phase).cos(),
                    Waveform::Square => {
                        if frac < self.duty_cycle {
                            self.amplitude
                        } else {
                            -self.amplitude
                        }
                    }
                    Waveform::Sawtooth => self.amplitude * (2.0 * frac - 1.0),
                    Waveform::Triangle => {
                        if frac < 0.25 {
                            self.amplitude * 4.0 * frac
                        } else if frac < 0.75 {
                            self.amplitude * (2.0 - 4.0 * frac)
                        } else {
                            self.amplitude * (4.0 * frac - 4.0)
                        }
                    }
                }
            })
            .collect();

        Ok(samples)
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("frequency", self.frequency),
            ("sample rate", self.sample_rate),
            ("duration", self.duration),
            ("amplitude", self.amplitude),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(FilterError::InvalidArgument(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.duty_cycle.is_nan() || self.duty_cycle <= 0.0 || self.duty_cycle >= 1.0 {
            return Err(FilterError::InvalidArgument(format!(
                "duty cycle must be in (0, 1), got {}",
                self.duty_cycle
            )));
        }
        if 2.0 * self.frequency >= self.sample_rate {
            return Err(FilterError::InvalidArgument(format!(
                "frequency {} Hz must be below Nyquist ({} Hz)",
                self.frequency,
                self.sample_rate / 2.0
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ReferenceSignalGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Waveform:    {}", self.waveform)?;
        writeln!(f, "Frequency:   {:.1} Hz", self.frequency)?;
        writeln!(f, "Sample rate: {:.1} Hz", self.sample_rate)?;
        writeln!(f, "Duration:    {:.3} s", self.duration)?;
        writeln!(f, "Amplitude:   {:.3}", self.amplitude)?;
        writeln!(f, "Phase:       {:.2} rad", self.phase)?;
        writeln!(f, "Duty cycle:  {:.1}%", self.duty_cycle * 100.0)?;
        writeln!(f, "Samples:     {}", self.sample_count())?;
        write!(
            f,
            "Period:      {:.4} s ({:.1} samples)",
            1.0 / self.frequency,
            self.sample_rate / self.frequency
        )
    }
}
