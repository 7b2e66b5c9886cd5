mod csv;
mod json;
mod text;

use serde::Serialize;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Goertzel result for one complete block
#[derive(Debug, Clone, Serialize)]
pub struct DetectionOutput {
    pub block: usize,
    pub time_secs: f64,
    pub magnitude: f64,
    pub power: f64,
    pub level_db: f64,
    pub detected: bool,
}

/// Filter response at one frequency
#[derive(Debug, Clone, Serialize)]
pub struct ResponseOutput {
    /// Normalized frequency (cycles per sample)
    pub frequency: f64,
    pub magnitude: f64,
    pub magnitude_db: f64,
    /// Phase in radians
    pub phase: f64,
    /// Group delay in samples
    pub group_delay: f64,
}

pub trait Formatter {
    fn detection(&self, output: &DetectionOutput) -> String;

    fn response(&self, output: &ResponseOutput) -> String;

    fn detection_header(&self) -> Option<&'static str> {
        None
    }

    fn response_header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
