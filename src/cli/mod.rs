use clap::{Parser, Subcommand};

mod batch;
mod metrics;
mod run;
mod validate;

#[derive(Parser, Debug)]
#[command(
    name = "dock-rank",
    version,
    about = "Rank docked ligand conformations across protein targets"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(run::RunArgs),
    Batch(batch::BatchArgs),
    Validate(validate::ValidateArgs),
    Metrics(metrics::MetricsArgs),
}

impl Cli {
    pub fn dispatch(self) -> anyhow::Result<()> {
        match self.command {
            Command::Run(args) => run::handle(args),
            Command::Batch(args) => batch::handle(args),
            Command::Validate(args) => validate::handle(args),
            Command::Metrics(args) => metrics::handle(args),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/cli/mod.rs"]
mod tests;
