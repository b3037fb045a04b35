use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use tracing::info;

use crate::model::metrics::{MetricCatalog, MetricId};
use crate::pipeline::stage1_load::{Dataset, run_stage1};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Directory with one docking CSV per protein
    #[arg(long)]
    input: PathBuf,

    /// Output directory
    #[arg(long)]
    out: PathBuf,
}

pub fn handle(args: ValidateArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out)?;

    let start = Instant::now();
    info!(stage = "stage1_load", "starting stage");
    let dataset = run_stage1(&args.input, MetricCatalog::global())?;
    info!(
        stage = "stage1_load",
        elapsed_ms = start.elapsed().as_millis(),
        proteins = dataset.proteins.len(),
        rows = dataset.rows.len(),
        "finished stage"
    );

    write_validate(&args.out, &dataset)?;
    Ok(())
}

pub(crate) fn render_validate(dataset: &Dataset) -> String {
    let mut buf = String::new();
    buf.push_str("protein\trows_read\trows_kept\tfailed_docks\tunparsed_values");
    for id in MetricId::ordered() {
        buf.push_str("\tmissing_");
        buf.push_str(id.as_str());
    }
    buf.push('\n');
    for stats in &dataset.proteins {
        buf.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}",
            stats.protein_name,
            stats.rows_read,
            stats.rows_kept,
            stats.failed_docks,
            stats.unparsed_values
        ));
        for count in stats.missing {
            buf.push('\t');
            buf.push_str(&count.to_string());
        }
        buf.push('\n');
    }
    buf.push_str(&format!(
        "# distinct_conformations\t{}\n",
        dataset.distinct_conformations()
    ));
    buf
}

fn write_validate(out_dir: &Path, dataset: &Dataset) -> anyhow::Result<()> {
    std::fs::write(out_dir.join("validate.tsv"), render_validate(dataset))?;
    Ok(())
}
