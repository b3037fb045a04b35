use crate::model::error::RankError;
use crate::model::metrics::{MetricGroup, MetricId, MetricSelection};
use crate::model::rows::NormalizedValues;
use crate::model::weights::{MetricWeights, TopLevelWeights};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeScores {
    pub docking_index: f64,
    pub energy_index: f64,
    pub optional_index: Option<f64>,
    pub total_index: f64,
}

#[derive(Debug, Clone)]
struct WeightedGroup {
    terms: Vec<(MetricId, f64)>,
    weight_sum: f64,
}

impl WeightedGroup {
    fn build(
        group: MetricGroup,
        selection: &MetricSelection,
        weights: &MetricWeights,
    ) -> Result<Option<Self>, RankError> {
        let terms: Vec<(MetricId, f64)> = selection
            .in_group(group)
            .map(|id| (id, weights.get(id)))
            .collect();
        if terms.is_empty() {
            return Ok(None);
        }
        let weight_sum: f64 = terms.iter().map(|(_, w)| *w).sum();
        if weight_sum <= 0.0 {
            return Err(RankError::DegenerateWeightSum {
                group: group.as_str().to_string(),
            });
        }
        Ok(Some(Self { terms, weight_sum }))
    }

    fn weighted_average(&self, values: &NormalizedValues) -> f64 {
        let sum: f64 = self.terms.iter().map(|(id, w)| w * values.get(*id)).sum();
        sum / self.weight_sum
    }
}

/// Combines normalized metrics of one conformation-protein pair. All weight
/// validation happens in [`CompositeScorer::new`]; scoring never fails.
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    docking: WeightedGroup,
    energy: WeightedGroup,
    optional: Option<WeightedGroup>,
    top_level: TopLevelWeights,
}

impl CompositeScorer {
    pub fn new(
        selection: &MetricSelection,
        weights: &MetricWeights,
        top_level: TopLevelWeights,
    ) -> Result<Self, RankError> {
        weights.validate()?;
        top_level.validate()?;

        let docking = WeightedGroup::build(MetricGroup::Docking, selection, weights)?
            .ok_or_else(|| missing_group(MetricGroup::Docking))?;
        let energy = WeightedGroup::build(MetricGroup::Energy, selection, weights)?
            .ok_or_else(|| missing_group(MetricGroup::Energy))?;
        let optional = WeightedGroup::build(MetricGroup::Optional, selection, weights)?;

        Ok(Self {
            docking,
            energy,
            optional,
            top_level,
        })
    }

    pub fn has_optional(&self) -> bool {
        self.optional.is_some()
    }

    pub fn score(&self, values: &NormalizedValues) -> CompositeScores {
        let docking_index = self.docking.weighted_average(values);
        let energy_index = self.energy.weighted_average(values);
        let optional_index = self.optional.as_ref().map(|g| g.weighted_average(values));

        let total_index = match optional_index {
            Some(optional_index) => {
                self.top_level.docking * docking_index
                    + self.top_level.energy * energy_index
                    + self.top_level.optional * optional_index
            }
            None => {
                TopLevelWeights::REQUIRED_ONLY_SPLIT * docking_index
                    + TopLevelWeights::REQUIRED_ONLY_SPLIT * energy_index
            }
        };

        CompositeScores {
            docking_index,
            energy_index,
            optional_index,
            total_index,
        }
    }
}

fn missing_group(group: MetricGroup) -> RankError {
    RankError::InvalidMetricSelection {
        missing: MetricId::ordered()
            .iter()
            .filter(|m| m.group() == group)
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/score/composite.rs"]
mod tests;
