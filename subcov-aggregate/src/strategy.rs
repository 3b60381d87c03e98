use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

///
/// How genes are classified as suboptimal.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Length-weighted gene percentage compared against the cutoff.
    Gene,
    /// Any single exon below the cutoff flags its gene.
    Exon,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gene" | "aggregate" => Ok(Strategy::Gene),
            "exon" => Ok(Strategy::Exon),
            _ => Err(format!("Invalid aggregation strategy: {}", s)),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Gene => write!(f, "gene"),
            Strategy::Exon => write!(f, "exon"),
        }
    }
}

///
/// Which coordinate is reported as a gene aggregate's end position.
///
/// Historical reports used the start of the last exon, and downstream
/// consumers compare against those reports, so that stays the default.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndPolicy {
    #[serde(rename = "start")]
    LastExonStart,
    #[serde(rename = "end")]
    LastExonEnd,
}

impl FromStr for EndPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" | "last-exon-start" => Ok(EndPolicy::LastExonStart),
            "end" | "last-exon-end" => Ok(EndPolicy::LastExonEnd),
            _ => Err(format!("Invalid end policy: {}", s)),
        }
    }
}
