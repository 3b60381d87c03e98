use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::models::GeneId;

///
/// ExonRecord struct, one row of the per-exon coverage table
///
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExonRecord {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub gene: GeneId,

    /// Percentage of bases at or above the configured read depth.
    pub percentage: f64,

    pub read_count: Option<u64>,
    pub mean_coverage: Option<f64>,
}

impl ExonRecord {
    ///
    /// Get the length of the exon in bases
    ///
    pub fn length(&self) -> u64 {
        self.end - self.start
    }

    ///
    /// Number of bases meeting the read depth, as implied by the percentage
    ///
    pub fn bases_above_threshold(&self) -> f64 {
        self.percentage / 100.0 * self.length() as f64
    }

    /// `chr:start-end`
    pub fn position(&self) -> String {
        format!("{}:{}-{}", self.chromosome, self.start, self.end)
    }

    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chromosome, self.start, self.end, self.gene.symbol, self.gene.accession, self.percentage
        )
    }
}

impl Display for ExonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
