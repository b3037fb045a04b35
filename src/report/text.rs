use crate::pipeline::stage6_report::FinalSummary;

pub fn render_report(summary: &FinalSummary) -> String {
    let mut out = String::new();
    out.push_str("Docking Conformation Ranking Report\n");
    out.push_str("===================================\n\n");
    out.push_str("Indices are weighted averages of dataset-wide normalized Glide metrics. ");
    out.push_str("Lower is better; they rank poses relative to this dataset only.\n\n");

    out.push_str("Dataset overview:\n");
    out.push_str(&format!("- Proteins: {}\n", summary.input.proteins));
    out.push_str(&format!("- Rows scored: {}\n", summary.input.rows));
    out.push_str(&format!("- Failed docks excluded: {}\n", summary.input.failed_docks));
    out.push_str(&format!("- Conformations: {}\n\n", summary.input.conformations));

    out.push_str("Configuration:\n");
    out.push_str(&format!("- Normalization: {}\n", summary.config.normalization));
    out.push_str(&format!(
        "- Metrics: {}\n",
        summary.config.selected_metrics.join(", ")
    ));
    out.push_str(&format!(
        "- Top-level weights: docking {:.2}, energy {:.2}, optional {:.2}\n\n",
        summary.config.top_level.docking,
        summary.config.top_level.energy,
        summary.config.top_level.optional
    ));

    out.push_str("Best conformation:\n");
    match &summary.results.top_conformation {
        Some(top) => out.push_str(&format!(
            "- title {} / lignum {} on {} (total index {:.4})\n\n",
            top.title, top.lignum, top.best_protein, top.total_index
        )),
        None => out.push_str("- none\n\n"),
    }

    out.push_str("Protein wins:\n");
    let top = top_proteins(&summary.results.wins, 5);
    for (name, wins) in top {
        out.push_str(&format!("- {}: {}\n", name, wins));
    }
    out.push('\n');

    out
}

fn top_proteins(wins: &std::collections::BTreeMap<String, usize>, k: usize) -> Vec<(String, usize)> {
    let mut pairs: Vec<(String, usize)> = wins.iter().map(|(p, w)| (p.clone(), *w)).collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs.truncate(k);
    pairs
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
