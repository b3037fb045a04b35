use std::fmt;

use serde::Serialize;

use crate::model::metrics::{METRIC_COUNT, MetricId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConformationId {
    pub title: i64,
    pub lignum: i64,
}

impl ConformationId {
    pub fn new(title: i64, lignum: i64) -> Self {
        Self { title, lignum }
    }
}

impl fmt::Display for ConformationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.title, self.lignum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricValues([Option<f64>; METRIC_COUNT]);

impl MetricValues {
    pub fn missing() -> Self {
        Self([None; METRIC_COUNT])
    }

    pub fn get(&self, id: MetricId) -> Option<f64> {
        self.0[id.index()]
    }

    pub fn set(&mut self, id: MetricId, value: Option<f64>) {
        self.0[id.index()] = value;
    }

    pub fn with(mut self, id: MetricId, value: Option<f64>) -> Self {
        self.set(id, value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedValues([f64; METRIC_COUNT]);

impl NormalizedValues {
    pub fn get(&self, id: MetricId) -> f64 {
        self.0[id.index()]
    }

    pub fn set(&mut self, id: MetricId, value: f64) {
        self.0[id.index()] = value;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub protein_name: String,
    pub conformation: ConformationId,
    pub values: MetricValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    /// Index of the source row in the dataset.
    pub row: usize,
    pub conformation: ConformationId,
    pub protein_name: String,
    pub normalized: NormalizedValues,
    pub docking_index: f64,
    pub energy_index: f64,
    pub optional_index: Option<f64>,
    pub total_index: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConformationRankEntry {
    pub conformation: ConformationId,
    pub title: i64,
    pub lignum: i64,
    pub best_protein: String,
    pub total_index: f64,
    pub docking_index: f64,
    pub energy_index: f64,
    pub optional_index: Option<f64>,
    pub raw: MetricValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProteinRankEntry {
    pub protein_name: String,
    pub win_count: usize,
    pub avg_total_index: f64,
    pub avg_docking_index: f64,
    pub avg_energy_index: f64,
}
