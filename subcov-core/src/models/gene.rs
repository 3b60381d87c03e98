use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::GENE_IDENTITY_DELIMITER;

///
/// Composite gene identity, `<symbol>;<accession>`.
///
/// Only the first semicolon separates the two halves, so accessions that
/// themselves carry `;` or `:` survive intact.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneId {
    pub symbol: String,
    pub accession: String,
}

impl GeneId {
    pub fn new(symbol: impl Into<String>, accession: impl Into<String>) -> Self {
        GeneId {
            symbol: symbol.into(),
            accession: accession.into(),
        }
    }
}

impl FromStr for GeneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(GENE_IDENTITY_DELIMITER) {
            Some((symbol, accession)) if !symbol.is_empty() => Ok(GeneId::new(symbol, accession)),
            _ => Err(format!("Invalid gene identity: {}", s)),
        }
    }
}

impl Display for GeneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.symbol, GENE_IDENTITY_DELIMITER, self.accession)
    }
}

///
/// Per-gene coverage summary derived from the gene's exons.
///
/// `end` holds whatever the aggregator's end policy selected; by default
/// that is the *start* of the last exon, not its end.
///
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneAggregate {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub gene: GeneId,
    pub percentage: f64,
}

impl GeneAggregate {
    ///
    /// Get the tab separated representation of the aggregate
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{:.2}",
            self.chromosome,
            self.start,
            self.end,
            self.gene.symbol,
            self.gene.accession,
            self.percentage
        )
    }
}

impl Display for GeneAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("BRCA1;NM_007294.4", "BRCA1", "NM_007294.4")]
    #[case("TP53;NM_000546.6;ENST00000269305", "TP53", "NM_000546.6;ENST00000269305")]
    #[case("PMS2;NM_000535.7:c.1", "PMS2", "NM_000535.7:c.1")]
    #[case("ORPHAN;", "ORPHAN", "")]
    fn test_parse_gene_identity(#[case] raw: &str, #[case] symbol: &str, #[case] accession: &str) {
        let gene = GeneId::from_str(raw).unwrap();
        assert_eq!(gene.symbol, symbol);
        assert_eq!(gene.accession, accession);
        assert_eq!(gene.to_string(), raw);
    }

    #[rstest]
    #[case("BRCA1")]
    #[case(";NM_1")]
    #[case("")]
    fn test_parse_gene_identity_invalid(#[case] raw: &str) {
        assert!(GeneId::from_str(raw).is_err());
    }

    #[rstest]
    fn test_aggregate_as_string() {
        let aggregate = GeneAggregate {
            chromosome: "chr17".to_string(),
            start: 100,
            end: 200,
            gene: GeneId::new("BRCA1", "NM_1"),
            percentage: 83.3333,
        };
        assert_eq!(aggregate.as_string(), "chr17\t100\t200\tBRCA1\tNM_1\t83.33");
    }
}
