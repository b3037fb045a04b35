use thiserror::Error;

use crate::aggregate::conformation::rank_conformations;
use crate::model::error::RankError;
use crate::model::rows::ConformationRankEntry;
use crate::pipeline::stage1_load::Dataset;
use crate::pipeline::stage3_score::ScoreContext;

#[derive(Debug, Error)]
pub enum Stage4Error {
    #[error("{0}")]
    Rank(#[from] RankError),
}

#[derive(Debug, Clone)]
pub struct ConformationContext {
    pub entries: Vec<ConformationRankEntry>,
}

impl ConformationContext {
    pub fn best(&self) -> Option<&ConformationRankEntry> {
        self.entries.first()
    }
}

pub fn run_stage4_rank_conformations(
    dataset: &Dataset,
    scores: &ScoreContext,
) -> Result<ConformationContext, Stage4Error> {
    Ok(ConformationContext {
        entries: rank_conformations(&scores.rows, &dataset.rows)?,
    })
}
