use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::input::InputError;
use crate::input::detect::list_protein_files;
use crate::input::docking_csv::{ProteinTableStats, read_docking_csv};
use crate::model::error::RankError;
use crate::model::metrics::{MetricCatalog, MetricId};
use crate::model::rows::{ConformationId, RawRow};

#[derive(Debug, Error)]
pub enum Stage1Error {
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("{0}")]
    Rank(#[from] RankError),
}

/// Merged rows of every protein file, one row per conformation per protein.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub input_dir: PathBuf,
    pub rows: Vec<RawRow>,
    pub proteins: Vec<ProteinTableStats>,
}

impl Dataset {
    /// Builds a dataset from rows that were ingested elsewhere.
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let mut proteins: Vec<ProteinTableStats> = Vec::new();
        for row in &rows {
            let idx = match proteins
                .iter()
                .position(|p| p.protein_name == row.protein_name)
            {
                Some(idx) => idx,
                None => {
                    proteins.push(ProteinTableStats {
                        protein_name: row.protein_name.clone(),
                        ..ProteinTableStats::default()
                    });
                    proteins.len() - 1
                }
            };
            let stats = &mut proteins[idx];
            stats.rows_read += 1;
            stats.rows_kept += 1;
            for id in MetricId::ordered() {
                if row.values.get(*id).is_none() {
                    stats.missing[id.index()] += 1;
                }
            }
        }
        proteins.sort_by(|a, b| a.protein_name.cmp(&b.protein_name));
        Self {
            input_dir: PathBuf::new(),
            rows,
            proteins,
        }
    }

    pub fn protein_names(&self) -> Vec<String> {
        self.proteins.iter().map(|p| p.protein_name.clone()).collect()
    }

    pub fn distinct_conformations(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.conformation)
            .collect::<BTreeSet<ConformationId>>()
            .len()
    }

    pub fn failed_docks(&self) -> usize {
        self.proteins.iter().map(|p| p.failed_docks).sum()
    }
}

pub fn run_stage1(input_dir: &Path, catalog: &MetricCatalog) -> Result<Dataset, Stage1Error> {
    let files = list_protein_files(input_dir)?;

    let mut names = HashSet::new();
    let mut rows = Vec::new();
    let mut proteins = Vec::with_capacity(files.len());
    for file in &files {
        if !names.insert(file.protein_name.clone()) {
            return Err(InputError::DuplicateProtein(file.protein_name.clone()).into());
        }
        let table = read_docking_csv(file, catalog)?;
        if table.stats.failed_docks > 0 {
            warn!(
                protein = %file.protein_name,
                excluded = table.stats.failed_docks,
                "excluded failed docking rows"
            );
        }
        if table.stats.unparsed_values > 0 {
            warn!(
                protein = %file.protein_name,
                values = table.stats.unparsed_values,
                "non-numeric metric values treated as missing"
            );
        }
        rows.extend(table.rows);
        proteins.push(table.stats);
    }

    if rows.is_empty() {
        return Err(RankError::EmptyDataset.into());
    }

    Ok(Dataset {
        input_dir: input_dir.to_path_buf(),
        rows,
        proteins,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_load.rs"]
mod tests;
