use std::collections::BTreeMap;

use crate::model::rows::{ConformationRankEntry, ProteinRankEntry};

#[derive(Default)]
struct Totals {
    wins: usize,
    total: f64,
    docking: f64,
    energy: f64,
}

/// Summarizes conformation winners per protein. Proteins from `universe`
/// that never win are appended with `win_count == 0` and NaN averages.
pub fn aggregate_proteins(
    entries: &[ConformationRankEntry],
    universe: Option<&[String]>,
) -> Vec<ProteinRankEntry> {
    let mut totals: BTreeMap<&str, Totals> = BTreeMap::new();
    for entry in entries {
        let t = totals.entry(entry.best_protein.as_str()).or_default();
        t.wins += 1;
        t.total += entry.total_index;
        t.docking += entry.docking_index;
        t.energy += entry.energy_index;
    }

    let mut ranked: Vec<ProteinRankEntry> = totals
        .iter()
        .map(|(name, t)| {
            let n = t.wins as f64;
            ProteinRankEntry {
                protein_name: name.to_string(),
                win_count: t.wins,
                avg_total_index: t.total / n,
                avg_docking_index: t.docking / n,
                avg_energy_index: t.energy / n,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.avg_total_index
            .total_cmp(&b.avg_total_index)
            .then_with(|| b.win_count.cmp(&a.win_count))
            .then_with(|| a.protein_name.cmp(&b.protein_name))
    });

    if let Some(universe) = universe {
        let mut idle: Vec<&String> = universe
            .iter()
            .filter(|p| !totals.contains_key(p.as_str()))
            .collect();
        idle.sort();
        idle.dedup();
        ranked.extend(idle.into_iter().map(|name| ProteinRankEntry {
            protein_name: name.clone(),
            win_count: 0,
            avg_total_index: f64::NAN,
            avg_docking_index: f64::NAN,
            avg_energy_index: f64::NAN,
        }));
    }

    ranked
}

#[cfg(test)]
#[path = "../../tests/src_inline/aggregate/protein.rs"]
mod tests;
