use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shape_core::SphereVolumeRule;
use shape_tally::{Session, Step, Tally, TallyConfig, UnknownKindPolicy};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Tally scaled areas and volumes of the shapes listed in a CSV file.
#[derive(Debug, Parser)]
#[command(name = "shape-tally", version, about)]
struct Cli {
    /// Input file with one `kind,value,...` record per line.
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "SHAPE_TALLY_FORMAT")]
    format: OutputFormat,

    /// Digits after the decimal point in text output (full precision if omitted).
    #[arg(long, env = "SHAPE_TALLY_PRECISION")]
    precision: Option<usize>,

    /// What to do with a record that fails to parse, build or measure.
    #[arg(long, value_enum, default_value_t = ErrorPolicy::Abort, env = "SHAPE_TALLY_ON_ERROR")]
    on_error: ErrorPolicy,

    /// Treat records with an unrecognised kind as errors.
    #[arg(long, env = "SHAPE_TALLY_REJECT_UNKNOWN")]
    reject_unknown: bool,

    /// Compute sphere volume with the integer coefficient `4 / 3 == 1`.
    #[arg(long, env = "SHAPE_TALLY_LEGACY_SPHERE_VOLUME")]
    legacy_sphere_volume: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "warn", env = "SHAPE_TALLY_LOG")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One running total per line.
    Text,
    /// One JSON object per directive.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ErrorPolicy {
    Abort,
    Skip,
}

impl Cli {
    fn tally_config(&self) -> TallyConfig {
        let unknown_kinds = if self.reject_unknown {
            UnknownKindPolicy::Reject
        } else {
            UnknownKindPolicy::Ignore
        };
        let sphere_volume = if self.legacy_sphere_volume {
            SphereVolumeRule::LegacyTruncated
        } else {
            SphereVolumeRule::Exact
        };
        TallyConfig::new(unknown_kinds, sphere_volume)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RunSummary {
    records: usize,
    tallies: usize,
    skipped: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let source = read_input(&cli.input)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = run(&cli, &source, &mut out)?;
    out.flush()?;

    info!(
        records = summary.records,
        tallies = summary.tallies,
        skipped = summary.skipped,
        "finished"
    );
    Ok(())
}

/// `RUST_LOG` wins over `--log-level`; logs go to stderr.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn run<W>(cli: &Cli, source: &str, out: &mut W) -> Result<RunSummary>
where
    W: Write,
{
    let lines = source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect::<Vec<_>>();

    let (tallies, skipped) = match cli.on_error {
        ErrorPolicy::Abort => {
            let records = lines.iter().map(|(_, line)| split_fields(line));
            let tallies = shape_tally::run(records, cli.tally_config()).map_err(|err| {
                let context = match lines.get(err.record - 1) {
                    Some((line_no, line)) => format!("line {line_no}: `{}`", line.trim()),
                    None => format!("record {}", err.record),
                };
                anyhow::Error::new(err.error).context(context)
            })?;
            (tallies, 0)
        }
        ErrorPolicy::Skip => tally_skipping(cli.tally_config(), &lines),
    };

    for tally in &tallies {
        write_tally(out, tally, cli.format, cli.precision)?;
    }

    Ok(RunSummary {
        records: lines.len(),
        tallies: tallies.len(),
        skipped,
    })
}

/// Like [`shape_tally::run`], but logs and skips failing records.
fn tally_skipping(config: TallyConfig, lines: &[(usize, &str)]) -> (Vec<Tally>, usize) {
    let mut session = Session::new(config);
    let mut tallies = Vec::new();
    let mut skipped = 0;

    for &(line_no, line) in lines {
        match session.feed(split_fields(line).as_slice()) {
            Ok(Step::Tallied(tally)) => tallies.push(tally),
            Ok(Step::Stored(_) | Step::Ignored(_)) => {}
            Err(err) => {
                warn!(line = line_no, error = %err, "skipping record");
                skipped += 1;
            }
        }
    }

    if !session.is_empty() {
        warn!(
            pending = session.len(),
            "input ended with shapes that no directive measured"
        );
    }
    (tallies, skipped)
}

fn write_tally<W>(
    out: &mut W,
    tally: &Tally,
    format: OutputFormat,
    precision: Option<usize>,
) -> Result<()>
where
    W: Write,
{
    match format {
        OutputFormat::Text => {
            for total in &tally.totals {
                writeln!(out, "{}", format_total(*total, precision))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, tally)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn format_total(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{value:.digits$}"),
        None => value.to_string(),
    }
}
