pub mod stage1_load;
pub mod stage2_normalize;
pub mod stage3_score;
pub mod stage4_rank_conformations;
pub mod stage5_rank_proteins;
pub mod stage6_report;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::config::ResolvedConfig;
use crate::model::error::RankError;
use crate::model::metrics::MetricCatalog;
use crate::pipeline::stage1_load::{Dataset, Stage1Error, run_stage1};
use crate::pipeline::stage2_normalize::{Stage2Error, run_stage2};
use crate::pipeline::stage3_score::{ScoreContext, Stage3Error, run_stage3_score};
use crate::pipeline::stage4_rank_conformations::{
    ConformationContext, Stage4Error, run_stage4_rank_conformations,
};
use crate::pipeline::stage5_rank_proteins::{ProteinContext, run_stage5_rank_proteins};
use crate::pipeline::stage6_report::{FinalSummary, Stage6Error, run_stage6_report};

/// Cooperative cancellation flag shared between a caller and a running pipeline.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("stage1_load: {0}")]
    Load(#[from] Stage1Error),
    #[error("stage2_normalize: {0}")]
    Normalize(#[from] Stage2Error),
    #[error("stage3_score: {0}")]
    Score(#[from] Stage3Error),
    #[error("stage4_rank_conformations: {0}")]
    RankConformations(#[from] Stage4Error),
    #[error("stage6_report: {0}")]
    Report(#[from] Stage6Error),
    #[error("{0}")]
    Rank(#[from] RankError),
}

#[derive(Debug, Clone)]
pub struct Rankings {
    pub scores: ScoreContext,
    pub conformations: ConformationContext,
    pub proteins: ProteinContext,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub dataset: Dataset,
    pub rankings: Rankings,
    pub summary: FinalSummary,
}

/// Runs normalization, scoring and both rankings over an ingested dataset.
pub fn rank_dataset(
    dataset: &Dataset,
    config: &ResolvedConfig,
    cancel: &CancelToken,
) -> Result<Rankings, PipelineError> {
    let scorer = config.scorer()?;

    let start = Instant::now();
    info!(stage = "stage2_normalize", "starting stage");
    let normalized = run_stage2(dataset, config.normalization)?;
    info!(
        stage = "stage2_normalize",
        elapsed_ms = start.elapsed().as_millis(),
        method = config.normalization.as_str(),
        rows = normalized.values.len(),
        "finished stage"
    );

    let start = Instant::now();
    info!(stage = "stage3_score", "starting stage");
    let scores = run_stage3_score(dataset, &normalized, &scorer, cancel)?;
    info!(
        stage = "stage3_score",
        elapsed_ms = start.elapsed().as_millis(),
        rows = scores.rows.len(),
        optional = scores.has_optional,
        "finished stage"
    );

    if cancel.is_cancelled() {
        return Err(RankError::Cancelled.into());
    }

    let start = Instant::now();
    info!(stage = "stage4_rank_conformations", "starting stage");
    let conformations = run_stage4_rank_conformations(dataset, &scores)?;
    info!(
        stage = "stage4_rank_conformations",
        elapsed_ms = start.elapsed().as_millis(),
        conformations = conformations.entries.len(),
        "finished stage"
    );

    let start = Instant::now();
    info!(stage = "stage5_rank_proteins", "starting stage");
    let proteins = run_stage5_rank_proteins(dataset, &conformations, config.include_idle_proteins);
    info!(
        stage = "stage5_rank_proteins",
        elapsed_ms = start.elapsed().as_millis(),
        proteins = proteins.entries.len(),
        wins = proteins.total_wins(),
        "finished stage"
    );

    Ok(Rankings {
        scores,
        conformations,
        proteins,
    })
}

/// Full run: ingest `input_dir`, rank, and write every report into `out_dir`.
pub fn run_pipeline(
    input_dir: &Path,
    out_dir: &Path,
    config: &ResolvedConfig,
    cancel: &CancelToken,
) -> Result<RunOutcome, PipelineError> {
    let start = Instant::now();
    info!(stage = "stage1_load", "starting stage");
    let dataset = run_stage1(input_dir, MetricCatalog::global())?;
    info!(
        stage = "stage1_load",
        elapsed_ms = start.elapsed().as_millis(),
        proteins = dataset.proteins.len(),
        rows = dataset.rows.len(),
        failed_docks = dataset.failed_docks(),
        "finished stage"
    );

    let rankings = rank_dataset(&dataset, config, cancel)?;

    let start = Instant::now();
    info!(stage = "stage6_report", "starting stage");
    let summary = run_stage6_report(
        &dataset,
        config,
        &rankings.scores,
        &rankings.conformations,
        &rankings.proteins,
        out_dir,
    )?;
    info!(
        stage = "stage6_report",
        elapsed_ms = start.elapsed().as_millis(),
        "finished stage"
    );

    Ok(RunOutcome {
        dataset,
        rankings,
        summary,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
