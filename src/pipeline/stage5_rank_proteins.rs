use crate::aggregate::protein::aggregate_proteins;
use crate::model::rows::ProteinRankEntry;
use crate::pipeline::stage1_load::Dataset;
use crate::pipeline::stage4_rank_conformations::ConformationContext;

#[derive(Debug, Clone)]
pub struct ProteinContext {
    pub entries: Vec<ProteinRankEntry>,
}

impl ProteinContext {
    pub fn total_wins(&self) -> usize {
        self.entries.iter().map(|p| p.win_count).sum()
    }
}

pub fn run_stage5_rank_proteins(
    dataset: &Dataset,
    conformations: &ConformationContext,
    include_idle_proteins: bool,
) -> ProteinContext {
    let universe = include_idle_proteins.then(|| dataset.protein_names());
    ProteinContext {
        entries: aggregate_proteins(&conformations.entries, universe.as_deref()),
    }
}
