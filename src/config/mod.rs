pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::error::RankError;
use crate::model::metrics::{MetricCatalog, MetricSelection};
use crate::model::weights::{MetricWeights, TopLevelWeights};
use crate::score::composite::CompositeScorer;
use crate::score::normalize::NormalizationMethod;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid weight argument {0:?}: expected <metric>:<weight>")]
    WeightArg(String),
    #[error("batch file defines no configurations")]
    EmptyBatch,
    #[error("batch configuration name must not be empty")]
    EmptyName,
    #[error("duplicate batch configuration name: {0}")]
    DuplicateName(String),
    #[error("batch configuration name {0:?} must be a plain directory name")]
    InvalidName(String),
}

/// User-facing run configuration, as read from TOML or assembled from CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub normalization: NormalizationMethod,
    pub optional_metrics: Vec<String>,
    pub weights: BTreeMap<String, f64>,
    pub top_level: TopLevelWeights,
    pub include_idle_proteins: bool,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub normalization: NormalizationMethod,
    pub selection: MetricSelection,
    pub weights: MetricWeights,
    pub top_level: TopLevelWeights,
    pub include_idle_proteins: bool,
}

impl RunConfig {
    pub fn resolve(&self, catalog: &MetricCatalog) -> Result<ResolvedConfig, RankError> {
        let selection = MetricSelection::with_optional(catalog, &self.optional_metrics)?;
        let mut weights = MetricWeights::from_catalog(catalog);
        for (id, weight) in &self.weights {
            let def = catalog.lookup(id)?;
            weights.set(def.id, *weight);
        }
        let resolved = ResolvedConfig {
            normalization: self.normalization,
            selection,
            weights,
            top_level: self.top_level,
            include_idle_proteins: self.include_idle_proteins,
        };
        resolved.scorer()?;
        Ok(resolved)
    }
}

impl ResolvedConfig {
    pub fn scorer(&self) -> Result<CompositeScorer, RankError> {
        CompositeScorer::new(&self.selection, &self.weights, self.top_level)
    }
}

/// Parses a `<metric>:<weight>` command line argument.
pub fn parse_weight_arg(arg: &str) -> Result<(String, f64), ConfigError> {
    let (metric, weight) = arg
        .split_once(':')
        .ok_or_else(|| ConfigError::WeightArg(arg.to_string()))?;
    let metric = metric.trim();
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| ConfigError::WeightArg(arg.to_string()))?;
    if metric.is_empty() {
        return Err(ConfigError::WeightArg(arg.to_string()));
    }
    Ok((metric.to_string(), weight))
}

#[cfg(test)]
#[path = "../../tests/src_inline/config/mod.rs"]
mod tests;
