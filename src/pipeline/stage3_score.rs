use rayon::prelude::*;
use thiserror::Error;

use crate::model::error::RankError;
use crate::model::rows::ScoredRow;
use crate::pipeline::CancelToken;
use crate::pipeline::stage1_load::Dataset;
use crate::pipeline::stage2_normalize::NormalizedContext;
use crate::score::composite::CompositeScorer;

pub const SCORE_CHUNK_ROWS: usize = 4096;

#[derive(Debug, Error)]
pub enum Stage3Error {
    #[error("{0}")]
    Rank(#[from] RankError),
    #[error("normalized values cover {normalized} rows, dataset has {rows}")]
    LengthMismatch { rows: usize, normalized: usize },
}

#[derive(Debug, Clone)]
pub struct ScoreContext {
    pub rows: Vec<ScoredRow>,
    pub has_optional: bool,
}

pub fn run_stage3_score(
    dataset: &Dataset,
    normalized: &NormalizedContext,
    scorer: &CompositeScorer,
    cancel: &CancelToken,
) -> Result<ScoreContext, Stage3Error> {
    if dataset.rows.len() != normalized.values.len() {
        return Err(Stage3Error::LengthMismatch {
            rows: dataset.rows.len(),
            normalized: normalized.values.len(),
        });
    }

    // Each chunk is scored into its own buffer; buffers are joined in order.
    let chunks: Vec<Result<Vec<ScoredRow>, RankError>> = dataset
        .rows
        .par_chunks(SCORE_CHUNK_ROWS)
        .zip(normalized.values.par_chunks(SCORE_CHUNK_ROWS))
        .enumerate()
        .map(|(chunk, (raw, values))| {
            if cancel.is_cancelled() {
                return Err(RankError::Cancelled);
            }
            let base = chunk * SCORE_CHUNK_ROWS;
            Ok(raw
                .iter()
                .zip(values)
                .enumerate()
                .map(|(i, (row, norm))| {
                    let scores = scorer.score(norm);
                    ScoredRow {
                        row: base + i,
                        conformation: row.conformation,
                        protein_name: row.protein_name.clone(),
                        normalized: *norm,
                        docking_index: scores.docking_index,
                        energy_index: scores.energy_index,
                        optional_index: scores.optional_index,
                        total_index: scores.total_index,
                    }
                })
                .collect())
        })
        .collect();

    let mut rows = Vec::with_capacity(dataset.rows.len());
    for chunk in chunks {
        rows.extend(chunk?);
    }

    Ok(ScoreContext {
        rows,
        has_optional: scorer.has_optional(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_score.rs"]
mod tests;
