use anyhow::{Context, bail};
use clap::Parser;
use std::path::PathBuf;

use tonefilter::config::{FilterDesign, FilterKind, Frequency, PipelineConfig};
use tonefilter::{Filter, FilterChain, read_wav_mono, save_wav};

#[derive(Parser, Debug)]
#[command(name = "tonefilter")]
#[command(about = "Apply FIR/IIR filters to a WAV file", long_about = None)]
struct Args {
    /// Input WAV file (first channel is used)
    input: PathBuf,

    /// Output WAV file (mono, 32-bit float)
    output: PathBuf,

    /// TOML pipeline describing the filter chain
    #[arg(short, long, conflicts_with = "kind")]
    config: Option<PathBuf>,

    /// Single IIR design to apply instead of a pipeline file
    #[arg(short, long, value_enum, requires = "cutoff")]
    kind: Option<FilterKind>,

    /// Cutoff or centre frequency (e.g. "1000", "1.5khz")
    #[arg(long)]
    cutoff: Option<Frequency>,

    /// Quality factor for second-order designs
    #[arg(short, long, default_value_t = std::f64::consts::FRAC_1_SQRT_2)]
    q: f64,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_chain(args: &Args, sample_rate: f64) -> anyhow::Result<FilterChain> {
    let stages = if let Some(path) = &args.config {
        let pipeline = PipelineConfig::load(path)
            .with_context(|| format!("Failed to load pipeline {}", path.display()))?;
        if pipeline.detector.is_some() {
            log::info!("Ignoring detector section; use detect_tone for tone detection");
        }
        pipeline.build_filters()?
    } else if let (Some(kind), Some(cutoff)) = (args.kind, args.cutoff) {
        let design = FilterDesign::from_kind(kind, cutoff.normalized(sample_rate), args.q);
        log::info!("Design: {:?}", design);
        vec![design.build()?]
    } else {
        bail!("Either --config or --kind with --cutoff is required");
    };

    Ok(FilterChain::new(stages))
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

    let (mut samples, sample_rate) = read_wav_mono(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let mut chain = build_chain(&args, sample_rate as f64)?;
    log::info!(
        "Filtering {} samples at {} Hz through {} stage(s)",
        samples.len(),
        sample_rate,
        chain.len()
    );

    chain.process_buffer(&mut samples);

    save_wav(&args.output, &samples, sample_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Wrote {} samples to {}",
        samples.len(),
        args.output.display()
    );

    Ok(())
}
