use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::model::metrics::MetricCatalog;

#[derive(Args, Debug)]
pub struct MetricsArgs {
    #[command(subcommand)]
    command: MetricsCommand,
}

#[derive(Subcommand, Debug)]
enum MetricsCommand {
    List,
    Dump(MetricsDumpArgs),
}

#[derive(Args, Debug)]
pub struct MetricsDumpArgs {
    /// Output directory
    #[arg(long)]
    out: PathBuf,
}

pub fn handle(args: MetricsArgs) -> anyhow::Result<()> {
    match args.command {
        MetricsCommand::List => list_metrics(),
        MetricsCommand::Dump(args) => dump_metrics(args),
    }
}

fn list_metrics() -> anyhow::Result<()> {
    println!("metric_id\tgroup\trequired\tdefault_weight\tlabel");
    for def in MetricCatalog::global().all() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            def.id,
            def.id.group(),
            def.required,
            def.default_weight,
            def.label
        );
    }
    Ok(())
}

fn dump_metrics(args: MetricsDumpArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out)?;
    let json = serde_json::to_string_pretty(MetricCatalog::global())?;
    std::fs::write(args.out.join("metrics_catalog.json"), json)?;
    Ok(())
}
