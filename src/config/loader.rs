use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::config::{ConfigError, RunConfig};
use crate::model::weights::TopLevelWeights;
use crate::score::normalize::NormalizationMethod;

/// Written next to the per-configuration output directories.
pub const BATCH_REPORT_FILE: &str = "batch_report.tsv";

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "BatchEntryToml")]
pub struct BatchEntry {
    pub name: String,
    pub input: Option<PathBuf>,
    pub config: RunConfig,
}

/// On-disk shape of one `[[configuration]]` table: the run settings sit
/// inline next to `name` and `input`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchEntryToml {
    name: String,
    #[serde(default)]
    input: Option<PathBuf>,
    #[serde(default)]
    normalization: NormalizationMethod,
    #[serde(default)]
    optional_metrics: Vec<String>,
    #[serde(default)]
    weights: BTreeMap<String, f64>,
    #[serde(default)]
    top_level: TopLevelWeights,
    #[serde(default)]
    include_idle_proteins: bool,
}

impl From<BatchEntryToml> for BatchEntry {
    fn from(raw: BatchEntryToml) -> Self {
        Self {
            name: raw.name,
            input: raw.input,
            config: RunConfig {
                normalization: raw.normalization,
                optional_metrics: raw.optional_metrics,
                weights: raw.weights,
                top_level: raw.top_level,
                include_idle_proteins: raw.include_idle_proteins,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchFile {
    #[serde(default, rename = "configuration")]
    pub configurations: Vec<BatchEntry>,
}

pub fn load_run_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

pub fn parse_batch_file(text: &str) -> Result<BatchFile, ConfigError> {
    let batch: BatchFile = toml::from_str(text)?;
    if batch.configurations.is_empty() {
        return Err(ConfigError::EmptyBatch);
    }
    let mut names = HashSet::new();
    for entry in &batch.configurations {
        check_entry_name(&entry.name)?;
        if !names.insert(entry.name.as_str()) {
            return Err(ConfigError::DuplicateName(entry.name.clone()));
        }
    }
    Ok(batch)
}

pub fn load_batch_file(path: &Path) -> Result<BatchFile, ConfigError> {
    let text = fs::read_to_string(path)?;
    parse_batch_file(&text)
}

/// A configuration name becomes one directory directly under the batch
/// output directory.
fn check_entry_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::EmptyName);
    }
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(['/', '\\']) || name == BATCH_REPORT_FILE {
        return Err(ConfigError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/config/loader.rs"]
mod tests;
