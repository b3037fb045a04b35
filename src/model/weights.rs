use serde::{Deserialize, Serialize};

use crate::model::error::RankError;
use crate::model::metrics::{METRIC_COUNT, MetricCatalog, MetricId};

pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricWeights([f64; METRIC_COUNT]);

impl MetricWeights {
    pub fn from_catalog(catalog: &MetricCatalog) -> Self {
        let mut weights = [0.0; METRIC_COUNT];
        for def in catalog.all() {
            weights[def.id.index()] = def.default_weight;
        }
        Self(weights)
    }

    pub fn get(&self, id: MetricId) -> f64 {
        self.0[id.index()]
    }

    pub fn set(&mut self, id: MetricId, weight: f64) {
        self.0[id.index()] = weight;
    }

    pub fn with(mut self, id: MetricId, weight: f64) -> Self {
        self.set(id, weight);
        self
    }

    pub fn validate(&self) -> Result<(), RankError> {
        for id in MetricId::ordered() {
            let w = self.get(*id);
            if !w.is_finite() || w < 0.0 {
                return Err(RankError::InvalidWeightConfiguration {
                    group: id.as_str().to_string(),
                    reason: format!("weight must be a finite non-negative number, got {w}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self::from_catalog(MetricCatalog::global())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopLevelWeights {
    pub docking: f64,
    pub energy: f64,
    pub optional: f64,
}

impl Default for TopLevelWeights {
    fn default() -> Self {
        Self {
            docking: 0.4,
            energy: 0.4,
            optional: 0.2,
        }
    }
}

impl TopLevelWeights {
    /// The split used when no optional metric is selected.
    pub const REQUIRED_ONLY_SPLIT: f64 = 0.5;

    pub fn validate(&self) -> Result<(), RankError> {
        let parts = [
            ("docking", self.docking),
            ("energy", self.energy),
            ("optional", self.optional),
        ];
        for (name, w) in parts {
            if !w.is_finite() || w < 0.0 {
                return Err(RankError::InvalidWeightConfiguration {
                    group: format!("top_level.{name}"),
                    reason: format!("weight must be a finite non-negative number, got {w}"),
                });
            }
        }
        let sum = self.docking + self.energy + self.optional;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RankError::InvalidWeightConfiguration {
                group: "top_level".to_string(),
                reason: format!("docking + energy + optional must sum to 1.0, got {sum}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/weights.rs"]
mod tests;
