use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use crate::model::error::RankError;

pub const METRIC_COUNT: usize = 13;

pub const DOCKING_SENTINEL: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MetricId {
    #[serde(rename = "r_i_docking_score")]
    DockingScore,
    #[serde(rename = "r_i_glide_gscore")]
    GlideGscore,
    #[serde(rename = "r_i_glide_emodel")]
    GlideEmodel,
    #[serde(rename = "r_i_glide_energy")]
    GlideEnergy,
    #[serde(rename = "r_i_glide_lipo")]
    GlideLipo,
    #[serde(rename = "r_i_glide_hbond")]
    GlideHbond,
    #[serde(rename = "r_i_glide_metal")]
    GlideMetal,
    #[serde(rename = "r_i_glide_rewards")]
    GlideRewards,
    #[serde(rename = "r_i_glide_evdw")]
    GlideEvdw,
    #[serde(rename = "r_i_glide_ecoul")]
    GlideEcoul,
    #[serde(rename = "r_i_glide_erotb")]
    GlideErotb,
    #[serde(rename = "r_i_glide_esite")]
    GlideEsite,
    #[serde(rename = "r_i_glide_einternal")]
    GlideEinternal,
}

impl MetricId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::DockingScore => "r_i_docking_score",
            MetricId::GlideGscore => "r_i_glide_gscore",
            MetricId::GlideEmodel => "r_i_glide_emodel",
            MetricId::GlideEnergy => "r_i_glide_energy",
            MetricId::GlideLipo => "r_i_glide_lipo",
            MetricId::GlideHbond => "r_i_glide_hbond",
            MetricId::GlideMetal => "r_i_glide_metal",
            MetricId::GlideRewards => "r_i_glide_rewards",
            MetricId::GlideEvdw => "r_i_glide_evdw",
            MetricId::GlideEcoul => "r_i_glide_ecoul",
            MetricId::GlideErotb => "r_i_glide_erotb",
            MetricId::GlideEsite => "r_i_glide_esite",
            MetricId::GlideEinternal => "r_i_glide_einternal",
        }
    }

    /// Catalog order: the four required metrics first, then the optional ones.
    pub fn ordered() -> &'static [MetricId; METRIC_COUNT] {
        &[
            MetricId::DockingScore,
            MetricId::GlideGscore,
            MetricId::GlideEmodel,
            MetricId::GlideEnergy,
            MetricId::GlideLipo,
            MetricId::GlideHbond,
            MetricId::GlideMetal,
            MetricId::GlideRewards,
            MetricId::GlideEvdw,
            MetricId::GlideEcoul,
            MetricId::GlideErotb,
            MetricId::GlideEsite,
            MetricId::GlideEinternal,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn parse(id: &str) -> Option<MetricId> {
        MetricId::ordered()
            .iter()
            .copied()
            .find(|m| m.as_str() == id)
    }

    pub fn group(self) -> MetricGroup {
        match self {
            MetricId::DockingScore | MetricId::GlideGscore => MetricGroup::Docking,
            MetricId::GlideEmodel | MetricId::GlideEnergy => MetricGroup::Energy,
            _ => MetricGroup::Optional,
        }
    }

    pub fn is_required(self) -> bool {
        self.group() != MetricGroup::Optional
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    Docking,
    Energy,
    Optional,
}

impl MetricGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricGroup::Docking => "docking",
            MetricGroup::Energy => "energy",
            MetricGroup::Optional => "optional",
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDefinition {
    pub id: MetricId,
    pub label: &'static str,
    pub required: bool,
    pub missing_sentinel: Option<f64>,
    pub default_weight: f64,
}

impl MetricDefinition {
    fn new(id: MetricId, label: &'static str) -> Self {
        let required = id.is_required();
        let missing_sentinel = match id.group() {
            MetricGroup::Docking => Some(DOCKING_SENTINEL),
            _ => None,
        };
        Self {
            id,
            label,
            required,
            missing_sentinel,
            default_weight: if required { 1.0 } else { 0.5 },
        }
    }

    /// Maps a raw observation to a metric value; `None` means missing.
    pub fn classify(&self, raw: Option<f64>) -> Option<f64> {
        let value = raw?;
        if value.is_nan() {
            return None;
        }
        match self.missing_sentinel {
            Some(sentinel) if value == sentinel => None,
            _ => Some(value),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricCatalog {
    definitions: Vec<MetricDefinition>,
}

impl MetricCatalog {
    pub fn new() -> Self {
        let labels = [
            "Docking score",
            "Glide GScore",
            "Glide Emodel",
            "Glide energy",
            "Lipophilic contact term",
            "Hydrogen-bond term",
            "Metal-binding term",
            "Rewards and penalties",
            "Van der Waals energy",
            "Coulomb energy",
            "Rotatable-bond penalty",
            "Polar site term",
            "Internal strain energy",
        ];
        let definitions = MetricId::ordered()
            .iter()
            .zip(labels)
            .map(|(id, label)| MetricDefinition::new(*id, label))
            .collect();
        Self { definitions }
    }

    pub fn global() -> &'static MetricCatalog {
        static CATALOG: OnceLock<MetricCatalog> = OnceLock::new();
        CATALOG.get_or_init(MetricCatalog::new)
    }

    pub fn all(&self) -> &[MetricDefinition] {
        &self.definitions
    }

    pub fn required_metrics(&self) -> &[MetricDefinition] {
        &self.definitions[..4]
    }

    pub fn optional_metrics(&self) -> &[MetricDefinition] {
        &self.definitions[4..]
    }

    pub fn get(&self, id: MetricId) -> &MetricDefinition {
        &self.definitions[id.index()]
    }

    pub fn lookup(&self, id: &str) -> Result<&MetricDefinition, RankError> {
        MetricId::parse(id)
            .map(|m| self.get(m))
            .ok_or_else(|| RankError::UnknownMetric(id.to_string()))
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics taking part in scoring; always a superset of the required metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSelection {
    selected: [bool; METRIC_COUNT],
}

impl MetricSelection {
    pub fn new<I, S>(catalog: &MetricCatalog, ids: I) -> Result<Self, RankError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = [false; METRIC_COUNT];
        for id in ids {
            let def = catalog.lookup(id.as_ref())?;
            selected[def.id.index()] = true;
        }
        let missing: Vec<String> = catalog
            .required_metrics()
            .iter()
            .filter(|def| !selected[def.id.index()])
            .map(|def| def.id.as_str().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RankError::InvalidMetricSelection { missing });
        }
        Ok(Self { selected })
    }

    pub fn required_only() -> Self {
        let mut selected = [false; METRIC_COUNT];
        for id in MetricId::ordered().iter().filter(|m| m.is_required()) {
            selected[id.index()] = true;
        }
        Self { selected }
    }

    /// Required metrics plus `optional`, validated through [`MetricSelection::new`].
    pub fn with_optional<I, S>(catalog: &MetricCatalog, optional: I) -> Result<Self, RankError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = catalog
            .required_metrics()
            .iter()
            .map(|def| def.id.as_str().to_string())
            .chain(optional.into_iter().map(|id| id.as_ref().to_string()))
            .collect();
        Self::new(catalog, ids)
    }

    pub fn contains(&self, id: MetricId) -> bool {
        self.selected[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = MetricId> + '_ {
        MetricId::ordered()
            .iter()
            .copied()
            .filter(|m| self.contains(*m))
    }

    pub fn in_group(&self, group: MetricGroup) -> impl Iterator<Item = MetricId> + '_ {
        self.iter().filter(move |m| m.group() == group)
    }

    pub fn has_optional(&self) -> bool {
        self.in_group(MetricGroup::Optional).next().is_some()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.iter().map(|m| m.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/metrics.rs"]
mod tests;
