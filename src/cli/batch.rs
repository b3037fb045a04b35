use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use rayon::prelude::*;
use tracing::{error, info};

use crate::config::loader::{BATCH_REPORT_FILE, BatchEntry, load_batch_file};
use crate::model::metrics::MetricCatalog;
use crate::pipeline::{CancelToken, RunOutcome, run_pipeline};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Default input directory for configurations without their own `input`
    #[arg(long)]
    input: PathBuf,

    /// Output directory; each configuration writes into `<out>/<name>`
    #[arg(long)]
    out: PathBuf,

    /// TOML file with `[[configuration]]` tables
    #[arg(long)]
    batch: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BatchResult {
    pub name: String,
    pub elapsed_ms: u128,
    pub outcome: Result<BatchCounts, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchCounts {
    pub conformations: usize,
    pub proteins: usize,
}

pub fn handle(args: BatchArgs) -> anyhow::Result<()> {
    let batch = load_batch_file(&args.batch)?;
    std::fs::create_dir_all(&args.out)?;
    info!(configurations = batch.configurations.len(), "starting batch");

    let cancel = CancelToken::new();
    let results = run_batch(&batch.configurations, &args.input, &args.out, &cancel);
    std::fs::write(args.out.join(BATCH_REPORT_FILE), render_batch_report(&results))?;

    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    info!(
        configurations = results.len(),
        failed,
        "finished batch"
    );
    if failed == results.len() {
        anyhow::bail!("all {} batch configurations failed", failed);
    }
    Ok(())
}

/// Runs every configuration independently; results keep configuration order.
pub(crate) fn run_batch(
    entries: &[BatchEntry],
    default_input: &Path,
    out_dir: &Path,
    cancel: &CancelToken,
) -> Vec<BatchResult> {
    entries
        .par_iter()
        .map(|entry| {
            let start = Instant::now();
            let outcome = run_entry(entry, default_input, out_dir, cancel)
                .map(|run| BatchCounts {
                    conformations: run.rankings.conformations.entries.len(),
                    proteins: run.rankings.proteins.entries.len(),
                })
                .map_err(|err| {
                    error!(configuration = %entry.name, error = %err, "configuration failed");
                    format!("{err:#}")
                });
            BatchResult {
                name: entry.name.clone(),
                elapsed_ms: start.elapsed().as_millis(),
                outcome,
            }
        })
        .collect()
}

fn run_entry(
    entry: &BatchEntry,
    default_input: &Path,
    out_dir: &Path,
    cancel: &CancelToken,
) -> anyhow::Result<RunOutcome> {
    let config = entry.config.resolve(MetricCatalog::global())?;
    let input = entry.input.as_deref().unwrap_or(default_input);
    Ok(run_pipeline(input, &out_dir.join(&entry.name), &config, cancel)?)
}

pub(crate) fn render_batch_report(results: &[BatchResult]) -> String {
    let mut buf = String::from("name\tstatus\telapsed_ms\tconformations\tproteins\terror\n");
    for result in results {
        let line = match &result.outcome {
            Ok(counts) => format!(
                "{}\tok\t{}\t{}\t{}\t\n",
                result.name, result.elapsed_ms, counts.conformations, counts.proteins
            ),
            Err(message) => format!(
                "{}\tfailed\t{}\t\t\t{}\n",
                result.name,
                result.elapsed_ms,
                message.replace(['\t', '\n'], " ")
            ),
        };
        buf.push_str(&line);
    }
    buf
}

#[cfg(test)]
#[path = "../../tests/src_inline/cli/batch.rs"]
mod tests;
