use std::borrow::Cow;
use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::input::detect::ProteinFile;
use crate::input::{InputError, open_reader, path_display};
use crate::model::metrics::{METRIC_COUNT, MetricCatalog, MetricId};
use crate::model::rows::{ConformationId, MetricValues, RawRow};

pub const TITLE_COLUMN: &str = "title";
pub const LIGNUM_COLUMN: &str = "i_i_glide_lignum";
pub const STATUS_COLUMN: &str = "docking_status";

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProteinTableStats {
    pub protein_name: String,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub failed_docks: usize,
    pub unparsed_values: usize,
    pub missing: [usize; METRIC_COUNT],
}

#[derive(Debug, Clone)]
pub struct ProteinTable {
    pub rows: Vec<RawRow>,
    pub stats: ProteinTableStats,
}

pub fn read_docking_csv(
    file: &ProteinFile,
    catalog: &MetricCatalog,
) -> Result<ProteinTable, InputError> {
    let file_label = path_display(&file.path).to_string();
    let reader = open_reader(&file.path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| decode(h).trim_start_matches('\u{feff}').to_string())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let required_column = |name: &str| {
        column(name).ok_or_else(|| InputError::MissingColumn {
            file: file_label.clone(),
            column: name.to_string(),
        })
    };

    let title_idx = required_column(TITLE_COLUMN)?;
    let lignum_idx = required_column(LIGNUM_COLUMN)?;
    let mut metric_idx: [Option<usize>; METRIC_COUNT] = [None; METRIC_COUNT];
    for def in catalog.all() {
        metric_idx[def.id.index()] = if def.required {
            Some(required_column(def.id.as_str())?)
        } else {
            column(def.id.as_str())
        };
    }
    let status_idx = column(STATUS_COLUMN);

    let mut stats = ProteinTableStats {
        protein_name: file.protein_name.clone(),
        ..ProteinTableStats::default()
    };
    let mut rows = Vec::new();
    let mut seen: HashSet<ConformationId> = HashSet::new();

    for record in rdr.byte_records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).map(decode).unwrap_or(Cow::Borrowed(""));
        stats.rows_read += 1;

        if let Some(idx) = status_idx
            && is_failed_status(&field(idx))
        {
            stats.failed_docks += 1;
            continue;
        }

        let title = parse_id(&field(title_idx)).ok_or_else(|| InputError::InvalidField {
            file: file_label.clone(),
            line,
            field: TITLE_COLUMN.to_string(),
            value: field(title_idx).into_owned(),
        })?;
        let lignum = parse_id(&field(lignum_idx)).ok_or_else(|| InputError::InvalidField {
            file: file_label.clone(),
            line,
            field: LIGNUM_COLUMN.to_string(),
            value: field(lignum_idx).into_owned(),
        })?;
        let conformation = ConformationId::new(title, lignum);
        if !seen.insert(conformation) {
            return Err(InputError::DuplicateRow {
                file: file_label.clone(),
                line,
                conformation: conformation.to_string(),
            });
        }

        let mut values = MetricValues::missing();
        for id in MetricId::ordered() {
            let raw = match metric_idx[id.index()] {
                Some(idx) => {
                    let text = field(idx);
                    let parsed = parse_metric(&text);
                    if parsed.is_none() && !is_blank(&text) {
                        stats.unparsed_values += 1;
                    }
                    parsed
                }
                None => None,
            };
            let value = catalog.get(*id).classify(raw);
            if value.is_none() {
                stats.missing[id.index()] += 1;
            }
            values.set(*id, value);
        }

        rows.push(RawRow {
            protein_name: file.protein_name.clone(),
            conformation,
            values,
        });
    }

    stats.rows_kept = rows.len();
    debug!(
        protein = %file.protein_name,
        rows = stats.rows_kept,
        failed = stats.failed_docks,
        "read protein file"
    );
    Ok(ProteinTable { rows, stats })
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn is_blank(text: &str) -> bool {
    text.is_empty() || text.eq_ignore_ascii_case("na") || text.eq_ignore_ascii_case("nan")
}

fn parse_metric(text: &str) -> Option<f64> {
    if is_blank(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer identifier; integral floats such as `5.0` are accepted.
fn parse_id(text: &str) -> Option<i64> {
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    let v = text.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// A dock failed when its status is a nonzero code or a failure word.
pub fn is_failed_status(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    if let Ok(code) = text.parse::<i64>() {
        return code != 0;
    }
    ["fail", "failed", "error"]
        .iter()
        .any(|w| text.eq_ignore_ascii_case(w))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/docking_csv.rs"]
mod tests;
