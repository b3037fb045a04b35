use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::metrics::MetricId;
use crate::model::rows::{ConformationRankEntry, ProteinRankEntry, ScoredRow};

pub const CONFORMATION_TABLE: &str = "conformation_ranking.tsv";
pub const PROTEIN_TABLE: &str = "protein_ranking.tsv";
pub const SCORED_ROWS_TABLE: &str = "scored_rows.tsv";

pub fn write_conformation_ranking(
    out_dir: &Path,
    entries: &[ConformationRankEntry],
    metrics: &[MetricId],
) -> std::io::Result<()> {
    let mut writer = BufWriter::new(std::fs::File::create(out_dir.join(CONFORMATION_TABLE))?);
    let mut header =
        String::from("rank\ttitle\tlignum\ttotal_index\tdocking_index\tenergy_index\tbest_protein");
    for m in metrics {
        header.push('\t');
        header.push_str(m.as_str());
    }
    header.push('\n');
    writer.write_all(header.as_bytes())?;

    for (i, e) in entries.iter().enumerate() {
        let mut line = format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            e.title,
            e.lignum,
            fmt6(e.total_index),
            fmt6(e.docking_index),
            fmt6(e.energy_index),
            e.best_protein,
        );
        for m in metrics {
            line.push('\t');
            line.push_str(&fmt_raw(e.raw.get(*m)));
        }
        line.push('\n');
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

pub fn write_protein_ranking(out_dir: &Path, entries: &[ProteinRankEntry]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(std::fs::File::create(out_dir.join(PROTEIN_TABLE))?);
    writer.write_all(
        b"rank\tprotein\twin_count\tavg_total_index\tavg_docking_index\tavg_energy_index\n",
    )?;
    for (i, p) in entries.iter().enumerate() {
        let line = format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            i + 1,
            p.protein_name,
            p.win_count,
            fmt6(p.avg_total_index),
            fmt6(p.avg_docking_index),
            fmt6(p.avg_energy_index),
        );
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

pub fn write_scored_rows(out_dir: &Path, rows: &[ScoredRow]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(std::fs::File::create(out_dir.join(SCORED_ROWS_TABLE))?);
    writer.write_all(
        b"title\tlignum\tprotein\ttotal_index\tdocking_index\tenergy_index\toptional_index\n",
    )?;
    for r in rows {
        let line = format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            r.conformation.title,
            r.conformation.lignum,
            r.protein_name,
            fmt6(r.total_index),
            fmt6(r.docking_index),
            fmt6(r.energy_index),
            r.optional_index.map(fmt6).unwrap_or_else(|| "NA".to_string()),
        );
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

pub fn fmt6(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.6}", value)
    }
}

fn fmt_raw(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NA".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tables.rs"]
mod tests;
