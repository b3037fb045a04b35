use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    #[error("metric selection is missing required metrics: {}", missing.join(", "))]
    InvalidMetricSelection { missing: Vec<String> },
    #[error("invalid weight configuration for {group}: {reason}")]
    InvalidWeightConfiguration { group: String, reason: String },
    #[error("weights of metric group {group} sum to zero")]
    DegenerateWeightSum { group: String },
    #[error("scored row {row} has no source row (dataset has {rows})")]
    RowOutOfRange { row: usize, rows: usize },
    #[error("dataset is empty after ingestion")]
    EmptyDataset,
    #[error("run cancelled")]
    Cancelled,
}
