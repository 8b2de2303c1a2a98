use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecg_pulser::{
    read_csv, write_json, AnalysisContext, AnalysisParams, Intervals, Peaks, LEADS,
    SAMPLING_RATE_HZ,
};

const EXIT_USAGE: u8 = 1;
const EXIT_CSV_READ: u8 = 2;
const EXIT_JSON_WRITE: u8 = 3;
const EXIT_CONTEXT: u8 = 4;
const EXIT_LEAD_INDEX: u8 = 5;
const EXIT_ANALYSIS: u8 = 6;

/// Detect R-peaks and RR intervals in one lead of an ECG recording
#[derive(Parser)]
#[command(name = "ecg-pulser", version)]
struct Cli {
    /// Recording, one lead per row after a header row
    input_csv: PathBuf,

    /// Where to write the JSON report
    output_json: PathBuf,

    /// Lead to analyse (0-based, 1 is lead II)
    #[arg(long, default_value_t = 1)]
    lead: usize,

    /// Sampling rate of the recording (Hz)
    #[arg(long, default_value_t = SAMPLING_RATE_HZ as f64)]
    sampling_rate: f64,

    /// Number of leads in the recording
    #[arg(long, default_value_t = LEADS)]
    leads: usize,

    /// Amplification applied to the filtered signal
    #[arg(long, default_value_t = 100.0)]
    gain: f64,

    /// Lower bound for the detection threshold (integrated energy)
    #[arg(long)]
    r_threshold_hint: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// A failed stage and the exit code it maps to.
struct Failure {
    code: u8,
    cause: anyhow::Error,
}

trait ExitOn<T> {
    fn exit_on(self, code: u8) -> Result<T, Failure>;
}

impl<T> ExitOn<T> for anyhow::Result<T> {
    fn exit_on(self, code: u8) -> Result<T, Failure> {
        self.map_err(|cause| Failure { code, cause })
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure { code, cause }) => {
            error!("{cause:#}");
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let record = read_csv(&cli.input_csv)
        .with_context(|| format!("reading {}", cli.input_csv.display()))
        .exit_on(EXIT_CSV_READ)?;

    let params = AnalysisParams {
        sampling_rate_hz: cli.sampling_rate,
        leads: cli.leads,
        gain: cli.gain,
        r_threshold_hint: cli.r_threshold_hint,
    };
    let mut ctx = AnalysisContext::new(&params)
        .context("creating analysis context")
        .exit_on(EXIT_CONTEXT)?;

    let signal = if cli.lead < params.leads {
        record.lead(cli.lead)
    } else {
        None
    };
    let signal = signal
        .with_context(|| {
            format!(
                "lead {} not available ({} configured, {} in recording)",
                cli.lead,
                params.leads,
                record.lead_count()
            )
        })
        .exit_on(EXIT_LEAD_INDEX)?;

    let mut peaks = Peaks::new();
    let mut intervals = Intervals::new();
    ctx.analyze(
        signal,
        record.sample_count(),
        cli.lead,
        &mut peaks,
        Some(&mut intervals),
    )
    .with_context(|| format!("analysing lead {}", cli.lead))
    .exit_on(EXIT_ANALYSIS)?;
    ctx.destroy();

    info!("{} R-peaks detected", peaks.len());
    if let Some(bpm) = intervals.recent_heart_rate_bpm() {
        info!("Recent heart rate: {bpm:.1} bpm");
    }

    write_json(&cli.output_json, &peaks, &intervals)
        .with_context(|| format!("writing {}", cli.output_json.display()))
        .exit_on(EXIT_JSON_WRITE)?;

    Ok(())
}
