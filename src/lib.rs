pub mod aggregate;
pub mod cli;
pub mod config;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod score;

pub mod prelude {
    pub use crate::config::{ResolvedConfig, RunConfig};
    pub use crate::model::metrics::{MetricCatalog, MetricId, MetricSelection};
    pub use crate::pipeline::stage1_load::Dataset;
    pub use crate::pipeline::{CancelToken, rank_dataset, run_pipeline};
    pub use crate::score::normalize::NormalizationMethod;
}
