use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::error::RankError;
use crate::model::rows::{ConformationId, ConformationRankEntry, RawRow, ScoredRow};

/// Ordering chain shared by best-protein selection and the final sort:
/// total, docking, energy, then protein name.
pub fn compare_indices(
    a: (f64, f64, f64, &str),
    b: (f64, f64, f64, &str),
) -> Ordering {
    a.0.total_cmp(&b.0)
        .then_with(|| a.1.total_cmp(&b.1))
        .then_with(|| a.2.total_cmp(&b.2))
        .then_with(|| a.3.cmp(b.3))
}

fn row_key(row: &ScoredRow) -> (f64, f64, f64, &str) {
    (
        row.total_index,
        row.docking_index,
        row.energy_index,
        row.protein_name.as_str(),
    )
}

fn entry_key(entry: &ConformationRankEntry) -> (f64, f64, f64, &str) {
    (
        entry.total_index,
        entry.docking_index,
        entry.energy_index,
        entry.best_protein.as_str(),
    )
}

/// One entry per conformation, best protein first by the shared ordering chain.
/// Every scored row must point at a row of `dataset`.
pub fn rank_conformations(
    rows: &[ScoredRow],
    dataset: &[RawRow],
) -> Result<Vec<ConformationRankEntry>, RankError> {
    let mut best: BTreeMap<ConformationId, &ScoredRow> = BTreeMap::new();
    for row in rows {
        best.entry(row.conformation)
            .and_modify(|current| {
                if compare_indices(row_key(row), row_key(*current)) == Ordering::Less {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    let mut entries = Vec::with_capacity(best.len());
    for (conformation, row) in best {
        let source = dataset.get(row.row).ok_or(RankError::RowOutOfRange {
            row: row.row,
            rows: dataset.len(),
        })?;
        entries.push(ConformationRankEntry {
            conformation,
            title: conformation.title,
            lignum: conformation.lignum,
            best_protein: row.protein_name.clone(),
            total_index: row.total_index,
            docking_index: row.docking_index,
            energy_index: row.energy_index,
            optional_index: row.optional_index,
            raw: source.values,
        });
    }

    entries.sort_by(|a, b| {
        compare_indices(entry_key(a), entry_key(b))
            .then_with(|| a.conformation.cmp(&b.conformation))
    });
    Ok(entries)
}

#[cfg(test)]
#[path = "../../tests/src_inline/aggregate/conformation.rs"]
mod tests;
