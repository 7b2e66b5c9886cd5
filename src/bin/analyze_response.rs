use anyhow::{Context, bail};
use clap::Parser;

use tonefilter::IirFilter;
use tonefilter::config::{FilterDesign, FilterKind, Frequency};
use tonefilter::constants::NYQUIST_NORMALIZED;
use tonefilter::output::{OutputFormat, ResponseOutput, create_formatter};
use tonefilter::signal_processing::amplitude_to_db;

#[derive(Parser, Debug)]
#[command(name = "analyze_response")]
#[command(about = "Print magnitude, phase and group delay of an IIR filter", long_about = None)]
struct Args {
    /// Design to analyse
    #[arg(short, long, value_enum, requires = "cutoff", conflicts_with_all = ["b", "a"])]
    kind: Option<FilterKind>,

    /// Cutoff or centre frequency (e.g. "1000", "1.5khz")
    #[arg(long)]
    cutoff: Option<Frequency>,

    /// Quality factor for second-order designs
    #[arg(short, long, default_value_t = std::f64::consts::FRAC_1_SQRT_2)]
    q: f64,

    /// Sample rate in Hz used to normalize the cutoff
    #[arg(long, default_value_t = 8000.0)]
    sample_rate: f64,

    /// Raw feedforward coefficients, comma separated
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true, requires = "a")]
    b: Vec<f64>,

    /// Raw feedback coefficients, comma separated
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    a: Vec<f64>,

    /// Number of frequencies between 0 and Nyquist
    #[arg(short, long, default_value_t = 33)]
    points: usize,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_filter(args: &Args) -> anyhow::Result<IirFilter> {
    if let (Some(kind), Some(cutoff)) = (args.kind, args.cutoff) {
        let design = FilterDesign::from_kind(kind, cutoff.normalized(args.sample_rate), args.q);
        return design
            .build_iir()
            .with_context(|| format!("Invalid design {:?}", design));
    }
    if !args.b.is_empty() {
        return IirFilter::new(&args.b, &args.a).context("Invalid coefficients");
    }
    bail!("Either --kind with --cutoff or --b with --a is required");
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

    if args.points < 2 {
        bail!("--points must be at least 2");
    }

    let filter = build_filter(&args)?;
    let formatter = create_formatter(args.format, args.verbose > 0);

    if matches!(args.format, OutputFormat::Text) {
        println!("b = {:?}", filter.b_coefficients());
        println!("a = {:?}", filter.a_coefficients());
        println!(
            "Order {}, {}",
            filter.order(),
            if filter.is_stable() { "stable" } else { "UNSTABLE" }
        );
        println!();
    }

    if let Some(header) = formatter.response_header() {
        println!("{}", header);
    }

    let step = NYQUIST_NORMALIZED / (args.points - 1) as f64;
    for i in 0..args.points {
        // Keep the last point exactly on Nyquist
        let freq = (i as f64 * step).min(NYQUIST_NORMALIZED);
        let response = filter.response(freq)?;
        let magnitude = response.norm();
        let row = ResponseOutput {
            frequency: freq,
            magnitude,
            magnitude_db: amplitude_to_db(magnitude),
            phase: response.arg(),
            group_delay: filter.group_delay(freq)?,
        };
        println!("{}", formatter.response(&row));
    }

    Ok(())
}
