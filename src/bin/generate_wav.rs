use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use tonefilter::save_wav;
use tonefilter::simulation::{ReferenceSignalGenerator, Waveform, add_noise_snr, add_white_noise};

#[derive(Parser, Debug)]
#[command(name = "generate_wav")]
#[command(about = "Generate reference waveforms with optional Gaussian noise")]
struct Args {
    /// Output WAV file
    output: PathBuf,

    /// Waveform shape
    #[arg(short, long, value_enum, default_value = "sine")]
    waveform: Waveform,

    /// Tone frequency in Hz
    #[arg(short, long, default_value_t = 1000.0)]
    frequency: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 8000)]
    sample_rate: u32,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f64,

    /// Peak amplitude
    #[arg(short, long, default_value_t = 0.5)]
    amplitude: f64,

    /// Initial phase in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    phase: f64,

    /// Duty cycle for the square waveform
    #[arg(long, default_value_t = 0.5)]
    duty_cycle: f64,

    /// AWGN SNR in dB
    #[arg(long, allow_negative_numbers = true, conflicts_with = "noise_std")]
    snr: Option<f64>,

    /// Gaussian noise standard deviation
    #[arg(long)]
    noise_std: Option<f64>,

    /// Seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let generator = ReferenceSignalGenerator::new(args.frequency, args.sample_rate as f64, args.duration)
        .with_waveform(args.waveform)
        .with_amplitude(args.amplitude)
        .with_phase(args.phase)
        .with_duty_cycle(args.duty_cycle);

    println!("{}", generator);

    let mut samples = generator.generate().context("Invalid generator settings")?;

    if let Some(snr) = args.snr {
        add_noise_snr(&mut samples, snr, args.seed)?;
        println!("Noise:       {:.1} dB SNR", snr);
    } else if let Some(std_dev) = args.noise_std {
        add_white_noise(&mut samples, std_dev, args.seed)?;
        println!("Noise:       std dev {}", std_dev);
    }

    save_wav(&args.output, &samples, args.sample_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());

    Ok(())
}
