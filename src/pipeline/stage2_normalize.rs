use thiserror::Error;

use crate::model::error::RankError;
use crate::model::rows::NormalizedValues;
use crate::pipeline::stage1_load::Dataset;
use crate::score::normalize::{NormalizationMethod, normalize_dataset};

#[derive(Debug, Error)]
pub enum Stage2Error {
    #[error("{0}")]
    Rank(#[from] RankError),
}

#[derive(Debug, Clone)]
pub struct NormalizedContext {
    pub method: NormalizationMethod,
    /// Parallel to `Dataset::rows`.
    pub values: Vec<NormalizedValues>,
}

pub fn run_stage2(
    dataset: &Dataset,
    method: NormalizationMethod,
) -> Result<NormalizedContext, Stage2Error> {
    if dataset.rows.is_empty() {
        return Err(RankError::EmptyDataset.into());
    }
    Ok(NormalizedContext {
        method,
        values: normalize_dataset(&dataset.rows, method),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_normalize.rs"]
mod tests;
