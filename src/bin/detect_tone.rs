use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use std::path::PathBuf;

use tonefilter::config::{DetectorConfig, Frequency, PipelineConfig};
use tonefilter::output::{DetectionOutput, OutputFormat, create_formatter};
use tonefilter::signal_processing::amplitude_to_db;
use tonefilter::{Filter, FilterChain, read_wav_mono};

#[derive(Parser, Debug)]
#[command(name = "detect_tone")]
#[command(about = "Run a Goertzel tone detector over consecutive blocks of a WAV file", long_about = None)]
struct Args {
    /// Input WAV file (first channel is used)
    input: PathBuf,

    /// TOML pipeline: filter chain applied first, plus detector settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tone frequency (e.g. "1000", "1.2khz"); overrides the pipeline
    #[arg(short = 't', long)]
    frequency: Option<Frequency>,

    /// Samples per detection block; overrides the pipeline
    #[arg(short = 'n', long)]
    block_len: Option<usize>,

    /// Level in dB at or above which a block counts as a detection
    #[arg(long, default_value_t = -20.0, allow_negative_numbers = true)]
    threshold_db: f64,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let pipeline = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load pipeline {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let mut detector_config = pipeline.detector.clone().unwrap_or_default();
    if let Some(freq) = args.frequency {
        detector_config.frequency = freq.as_hz();
    }
    if let Some(block_len) = args.block_len {
        detector_config.block_len = block_len;
    }

    let (mut samples, sample_rate) = read_wav_mono(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let sample_rate = sample_rate as f64;

    let mut chain = FilterChain::new(pipeline.build_filters()?);
    if !chain.is_empty() {
        log::info!("Pre-filtering through {} stage(s)", chain.len());
        chain.process_buffer(&mut samples);
    }

    let mut detector = detector_config
        .build(sample_rate)
        .context("Invalid detector settings")?;
    log::info!(
        "Detecting {:.1} Hz (bin {} at {:.1} Hz) over {}-sample blocks",
        detector_config.frequency,
        detector.coefficient(),
        detector.target_frequency(sample_rate),
        detector.block_len()
    );

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.detection_header() {
        println!("{}", header);
    }

    let mut level_stats: Stats<f64> = Stats::new();
    let mut detections = 0usize;

    // A trailing partial block is not reported
    for (block, chunk) in samples.chunks_exact(detector.block_len()).enumerate() {
        detector.process_buffer(chunk)?;
        let magnitude = detector.magnitude()?;
        let level_db = amplitude_to_db(magnitude);
        let detected = level_db >= args.threshold_db;

        let row = DetectionOutput {
            block,
            time_secs: (block * detector.block_len()) as f64 / sample_rate,
            magnitude,
            power: detector.power()?,
            level_db,
            detected,
        };
        println!("{}", formatter.detection(&row));

        level_stats.update(level_db);
        if detected {
            detections += 1;
        }
        detector.reset();
    }

    if matches!(args.format, OutputFormat::Text) {
        print_summary(&level_stats, detections);
    }

    Ok(())
}

fn print_summary(stats: &Stats<f64>, detections: usize) {
    println!();
    if stats.count == 0 {
        println!("No complete blocks in input");
        return;
    }
    println!("Blocks:     {} ({} detected)", stats.count, detections);
    println!(
        "Level:      mean {:.2} dB, std dev {:.2} dB",
        stats.mean, stats.std_dev
    );
    println!("Range:      {:.2} .. {:.2} dB", stats.min, stats.max);
}
