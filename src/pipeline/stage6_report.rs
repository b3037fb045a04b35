use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::config::ResolvedConfig;
use crate::model::metrics::MetricId;
use crate::model::weights::TopLevelWeights;
use crate::pipeline::stage1_load::Dataset;
use crate::pipeline::stage3_score::ScoreContext;
use crate::pipeline::stage4_rank_conformations::ConformationContext;
use crate::pipeline::stage5_rank_proteins::ProteinContext;
use crate::report::json::write_summary;
use crate::report::tables::{
    write_conformation_ranking, write_protein_ranking, write_scored_rows,
};
use crate::report::text::render_report;

#[derive(Debug, Error)]
pub enum Stage6Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalSummary {
    pub tool: ToolSummary,
    pub input: InputSummary,
    pub config: ConfigSummary,
    pub results: ResultSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub input_dir: String,
    pub proteins: usize,
    pub rows: usize,
    pub failed_docks: usize,
    pub conformations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub normalization: String,
    pub selected_metrics: Vec<String>,
    pub weights: BTreeMap<String, f64>,
    pub top_level: TopLevelWeights,
    pub include_idle_proteins: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultSummary {
    pub top_conformation: Option<TopConformation>,
    pub top_protein: Option<TopProtein>,
    pub wins: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopConformation {
    pub title: i64,
    pub lignum: i64,
    pub best_protein: String,
    pub total_index: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopProtein {
    pub protein: String,
    pub win_count: usize,
    pub avg_total_index: f64,
}

pub fn build_summary(
    dataset: &Dataset,
    config: &ResolvedConfig,
    conformations: &ConformationContext,
    proteins: &ProteinContext,
) -> FinalSummary {
    let selected: Vec<MetricId> = config.selection.iter().collect();
    FinalSummary {
        tool: ToolSummary {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputSummary {
            input_dir: dataset.input_dir.to_string_lossy().to_string(),
            proteins: dataset.proteins.len(),
            rows: dataset.rows.len(),
            failed_docks: dataset.failed_docks(),
            conformations: conformations.entries.len(),
        },
        config: ConfigSummary {
            normalization: config.normalization.to_string(),
            selected_metrics: selected.iter().map(|m| m.as_str().to_string()).collect(),
            weights: selected
                .iter()
                .map(|m| (m.as_str().to_string(), config.weights.get(*m)))
                .collect(),
            top_level: config.top_level,
            include_idle_proteins: config.include_idle_proteins,
        },
        results: ResultSummary {
            top_conformation: conformations.best().map(|e| TopConformation {
                title: e.title,
                lignum: e.lignum,
                best_protein: e.best_protein.clone(),
                total_index: e.total_index,
            }),
            top_protein: proteins.entries.first().map(|p| TopProtein {
                protein: p.protein_name.clone(),
                win_count: p.win_count,
                avg_total_index: p.avg_total_index,
            }),
            wins: proteins
                .entries
                .iter()
                .map(|p| (p.protein_name.clone(), p.win_count))
                .collect(),
        },
    }
}

pub fn run_stage6_report(
    dataset: &Dataset,
    config: &ResolvedConfig,
    scores: &ScoreContext,
    conformations: &ConformationContext,
    proteins: &ProteinContext,
    out_dir: &Path,
) -> Result<FinalSummary, Stage6Error> {
    std::fs::create_dir_all(out_dir)?;

    let selected: Vec<MetricId> = config.selection.iter().collect();
    write_conformation_ranking(out_dir, &conformations.entries, &selected)?;
    write_protein_ranking(out_dir, &proteins.entries)?;
    write_scored_rows(out_dir, &scores.rows)?;

    let summary = build_summary(dataset, config, conformations, proteins);
    write_summary(out_dir, &summary)?;
    std::fs::write(out_dir.join("report.txt"), render_report(&summary))?;

    Ok(summary)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
