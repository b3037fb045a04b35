use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::loader::load_run_config;
use crate::config::{RunConfig, parse_weight_arg};
use crate::model::metrics::MetricCatalog;
use crate::pipeline::{CancelToken, run_pipeline};
use crate::score::normalize::NormalizationMethod;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory with one docking CSV per protein
    #[arg(long)]
    pub(crate) input: PathBuf,

    /// Output directory
    #[arg(long)]
    pub(crate) out: PathBuf,

    /// Optional TOML run configuration
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Normalization method (overrides the config file)
    #[arg(long, value_enum)]
    pub(crate) normalization: Option<NormalizationArg>,

    /// Optional metrics to include in scoring
    #[arg(long, num_args = 1..)]
    pub(crate) metrics: Vec<String>,

    /// Per-metric weight overrides as <metric>:<weight>
    #[arg(long, num_args = 1..)]
    pub(crate) weights: Vec<String>,

    /// List proteins without wins in the protein ranking
    #[arg(long)]
    pub(crate) include_idle_proteins: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizationArg {
    MinMax,
    ZScore,
    ZScoreLogistic,
}

impl From<NormalizationArg> for NormalizationMethod {
    fn from(value: NormalizationArg) -> Self {
        match value {
            NormalizationArg::MinMax => NormalizationMethod::MinMax,
            NormalizationArg::ZScore => NormalizationMethod::ZScore,
            NormalizationArg::ZScoreLogistic => NormalizationMethod::ZScoreLogistic,
        }
    }
}

impl RunArgs {
    /// Config file values with command line overrides applied.
    pub(crate) fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => load_run_config(path)?,
            None => RunConfig::default(),
        };
        if let Some(method) = self.normalization {
            config.normalization = method.into();
        }
        if !self.metrics.is_empty() {
            config.optional_metrics = self.metrics.clone();
        }
        for arg in &self.weights {
            let (metric, weight) = parse_weight_arg(arg)?;
            config.weights.insert(metric, weight);
        }
        if self.include_idle_proteins {
            config.include_idle_proteins = true;
        }
        Ok(config)
    }
}

pub fn handle(args: RunArgs) -> anyhow::Result<()> {
    let config = args.run_config()?.resolve(MetricCatalog::global())?;
    info!(
        normalization = config.normalization.as_str(),
        metrics = ?config.selection.ids(),
        "resolved configuration"
    );

    let outcome = run_pipeline(&args.input, &args.out, &config, &CancelToken::new())?;
    if let Some(best) = outcome.rankings.conformations.best() {
        info!(
            conformation = %best.conformation,
            protein = %best.best_protein,
            total_index = best.total_index,
            "best conformation"
        );
    }
    Ok(())
}
