use std::fs::read_to_string;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use subcov_core::LoaderOptions;

use crate::aggregator::{ExonLevelAggregator, GeneAggregator, GeneLevelAggregator};
use crate::consts::*;
use crate::strategy::{EndPolicy, Strategy};

///
/// Classification settings for one run.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AggregatorConfig {
    pub strategy: Strategy,

    /// Percentage below which a gene (or exon) is suboptimal.
    pub cutoff: f64,

    pub end_policy: EndPolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        AggregatorConfig {
            strategy: DEFAULT_STRATEGY,
            cutoff: DEFAULT_CUTOFF,
            end_policy: DEFAULT_END_POLICY,
        }
    }
}

impl AggregatorConfig {
    pub fn new(strategy: Strategy, cutoff: f64, end_policy: EndPolicy) -> Self {
        AggregatorConfig {
            strategy,
            cutoff,
            end_policy,
        }
    }

    ///
    /// Build the aggregator selected by this config.
    ///
    pub fn aggregator(&self) -> Box<dyn GeneAggregator> {
        match self.strategy {
            Strategy::Gene => Box::new(GeneLevelAggregator::new(self.cutoff, self.end_policy)),
            Strategy::Exon => Box::new(ExonLevelAggregator::new(self.cutoff)),
        }
    }
}

///
/// A full run configuration as stored in a `.toml` file:
///
/// ```toml
/// [loader]
/// separator = "whitespace"
/// coverage_threshold = 20
///
/// [aggregator]
/// strategy = "exon"
/// cutoff = 95.0
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RunConfig {
    pub loader: LoaderOptions,
    pub aggregator: AggregatorConfig,
}

impl RunConfig {
    ///
    /// Read a run config from disk.
    ///
    /// # Arguments
    /// - path: Path to the config file (a .toml) file.
    pub fn try_from(path: &Path) -> Result<RunConfig> {
        let toml_str = read_to_string(path)?;
        let config: RunConfig = toml::from_str(&toml_str)?;

        Ok(config)
    }
}
