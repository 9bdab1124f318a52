//! Casting a hexagram

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{self, print_info, print_success, OutputFormat};
use crate::view::{format_counts, HexagramView};
use clap::Args;
use qyq_core::{cast_with, write_record, Counts, CountsSource, ReplaySource, ShotSampler, HEXAGRAM_LINES};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Arguments for `qyq cast`
#[derive(Args)]
pub struct CastArgs {
    /// Shots per line for the local sampler (default 1024)
    #[arg(long, env = "QYQ_SHOTS", value_parser = clap::value_parser!(u32).range(1..))]
    shots: Option<u32>,

    /// Seed the local sampler for a reproducible cast
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file of counts objects produced by an external executor
    #[arg(long)]
    counts: Option<PathBuf>,

    /// Context label written into the record header
    #[arg(long)]
    label: Option<String>,

    /// Save the cast record to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Only show the finished hexagram
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Serialize)]
struct CastOutput {
    #[serde(flatten)]
    hexagram: HexagramView,
    record: String,
    saved_to: Option<PathBuf>,
}

/// Read a counts file: a JSON array of objects mapping bit strings to counts
pub fn load_counts_file(path: &Path) -> CliResult<Vec<Counts>> {
    let contents = std::fs::read_to_string(path)?;
    let raw: Vec<BTreeMap<String, u64>> = serde_json::from_str(&contents)?;
    if raw.len() < HEXAGRAM_LINES {
        return Err(CliError::InvalidInput(format!(
            "{} holds {} distributions, a cast needs {}",
            path.display(),
            raw.len(),
            HEXAGRAM_LINES
        )));
    }
    if raw.len() > HEXAGRAM_LINES {
        tracing::warn!(
            extra = raw.len() - HEXAGRAM_LINES,
            "counts file has more distributions than lines; extras ignored"
        );
    }

    raw.into_iter()
        .map(|counts| Counts::from_register_counts(counts).map_err(CliError::from))
        .collect()
}

fn open_source(args: &CastArgs, config: &CliConfig) -> CliResult<Box<dyn CountsSource>> {
    if let Some(path) = &args.counts {
        if args.shots.is_some() || args.seed.is_some() {
            tracing::warn!("--shots and --seed have no effect with --counts");
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Ok(Box::new(ReplaySource::new(
            format!("file:{name}"),
            load_counts_file(path)?,
        )));
    }

    let shots = config.shots(args.shots);
    let sampler = match config.seed(args.seed) {
        Some(seed) => ShotSampler::seeded(shots, seed),
        None => ShotSampler::new(shots),
    };
    tracing::info!(shots, "using local shot sampler");
    Ok(Box::new(sampler))
}

/// Execute `qyq cast`
pub fn execute(args: CastArgs, config: &CliConfig, format: OutputFormat) -> CliResult<()> {
    let mut source = open_source(&args, config)?;
    let label = config.context_label(args.label.clone(), source.describe());
    let progress = matches!(format, OutputFormat::Table) && !args.quiet;

    let hexagram = cast_with(source.as_mut(), label, |h| {
        if !progress {
            return;
        }
        if let (Some(line), Some(obs)) = (h.lines().last(), h.observations().last()) {
            print_info(&format!("Line {}: {}  [{}]", h.len(), line.value(), format_counts(obs.row())));
        }
        print!("{}", h.render(true));
        println!();
    })?;

    let saved_to = match &args.save {
        Some(path) => {
            let path = config.record_path(path);
            write_record(&path, &hexagram)?;
            Some(path)
        }
        None => None,
    };

    match format {
        OutputFormat::Table => {
            if args.quiet {
                print!("{}", hexagram.render(true));
            }
            println!("CSV of run:");
            print!("{}", hexagram.to_record());
            if let Some(path) = &saved_to {
                print_success(&format!("Saved cast to {}", path.display()));
            }
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let out = CastOutput {
                hexagram: HexagramView::from(&hexagram),
                record: hexagram.to_record(),
                saved_to,
            };
            output::print_single(&out, format)
        }
    }
}
