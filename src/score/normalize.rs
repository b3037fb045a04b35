use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::metrics::MetricId;
use crate::model::rows::{NormalizedValues, RawRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMethod {
    #[default]
    MinMax,
    ZScore,
    ZScoreLogistic,
}

impl NormalizationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationMethod::MinMax => "min-max",
            NormalizationMethod::ZScore => "z-score",
            NormalizationMethod::ZScoreLogistic => "z-score-logistic",
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes one metric column. Lower stays better and missing values rank
/// worst, except for the `min == max` branch of min-max which maps present
/// values to 1 and missing values to 0.
pub fn normalize_column(values: &[Option<f64>], method: NormalizationMethod) -> Vec<f64> {
    let valid: Vec<f64> = values.iter().flatten().copied().collect();
    if valid.is_empty() {
        return vec![0.0; values.len()];
    }
    match method {
        NormalizationMethod::MinMax => min_max(values, &valid),
        NormalizationMethod::ZScore => z_score(values, &valid, false),
        NormalizationMethod::ZScoreLogistic => z_score(values, &valid, true),
    }
}

fn min_max(values: &[Option<f64>], valid: &[f64]) -> Vec<f64> {
    let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
    let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return values
            .iter()
            .map(|v| if v.is_some() { 1.0 } else { 0.0 })
            .collect();
    }

    let range = max - min;
    values
        .iter()
        .map(|v| match v {
            Some(v) => (v - min) / range,
            None => 1.0,
        })
        .collect()
}

fn z_score(values: &[Option<f64>], valid: &[f64], logistic: bool) -> Vec<f64> {
    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let std = if valid.len() < 2 {
        0.0
    } else {
        let ss: f64 = valid.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (n - 1.0)).sqrt()
    };

    if std == 0.0 || !std.is_finite() {
        return values
            .iter()
            .map(|v| if v.is_some() { 0.0 } else { 1.0 })
            .collect();
    }

    let worst = valid
        .iter()
        .map(|v| (v - mean) / std)
        .fold(f64::NEG_INFINITY, f64::max)
        + 1.0;

    values
        .iter()
        .map(|v| {
            let z = match v {
                Some(v) => (v - mean) / std,
                None => worst,
            };
            if logistic { logistic_fn(z) } else { z }
        })
        .collect()
}

fn logistic_fn(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Normalizes every metric over the whole dataset, all proteins together.
pub fn normalize_dataset(rows: &[RawRow], method: NormalizationMethod) -> Vec<NormalizedValues> {
    let mut out = vec![NormalizedValues::default(); rows.len()];
    let mut column = Vec::with_capacity(rows.len());
    for id in MetricId::ordered() {
        column.clear();
        column.extend(rows.iter().map(|r| r.values.get(*id)));
        let normalized = normalize_column(&column, method);
        for (slot, value) in out.iter_mut().zip(normalized) {
            slot.set(*id, value);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/score/normalize.rs"]
mod tests;
