use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueHint};
use log::info;

use crate::config::{load_config, ConvertConfig, OutputFormat};
use crate::convert::convert_with;
use crate::metrics::Metrics;

#[derive(Parser, Debug)]
#[command(about, version, name = "tcx2ttl")]
/// Convert a Garmin TCX workout file to RDF (Turtle or N-Triples)
pub struct Args {
    /// TCX file to convert
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
    /// File to write to
    ///
    /// By default the input path with `.tcx` replaced by `.ttl` (or `.nt`).
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Write the result to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
    /// JSON config file (missing file means defaults)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Output format, overrides the config file
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Print Prometheus counters to stderr when done
    #[arg(long)]
    pub metrics: bool,
}

/// Hvor resultatet havnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    Stdout,
    File(PathBuf),
}

/// Bare `.tcx` (uansett store/små bokstaver) slippes gjennom.
pub fn is_tcx(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tcx"))
}

/// `økt.tcx` -> `økt.ttl` / `økt.nt`.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

fn resolve_config(args: &Args) -> anyhow::Result<ConvertConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConvertConfig::default(),
    };
    if let Some(format) = args.format {
        config.format = format;
    }
    Ok(config)
}

/// Kjører én konvertering for CLI-argumentene.
pub fn run(args: &Args, metrics: &Metrics) -> anyhow::Result<Written> {
    if !is_tcx(&args.input) {
        bail!("only .tcx files are accepted, got {}", args.input.display());
    }
    let config = resolve_config(args)?;

    let tcx = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let conversion = convert_with(&tcx, &config, metrics)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;

    let written = if args.stdout {
        io::stdout()
            .lock()
            .write_all(conversion.text.as_bytes())
            .context("failed to write to stdout")?;
        Written::Stdout
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input, config.format));
        fs::write(&path, &conversion.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(
            "{} -> {} ({} triples, {})",
            args.input.display(),
            path.display(),
            conversion.stats.triples,
            config.format.media_type()
        );
        Written::File(path)
    };

    if args.metrics {
        eprint!("{}", metrics.render()?);
    }
    Ok(written)
}
