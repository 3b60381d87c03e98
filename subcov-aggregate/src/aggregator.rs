use fxhash::FxHashMap;
use log::{debug, info};

use subcov_core::models::{ExonRecord, GeneAggregate, GeneId};
use subcov_core::utils::round_to;

use crate::consts::PERCENTAGE_DECIMALS;
use crate::errors::AggregateError;
use crate::strategy::{EndPolicy, Strategy};

///
/// The exons of one gene, in input order.
///
#[derive(Debug, Clone)]
pub struct GeneGroup<'a> {
    pub gene: &'a GeneId,
    pub exons: Vec<&'a ExonRecord>,
}

///
/// A gene classified as suboptimal, with the exons that justify it.
///
/// For the gene level strategy `exons` holds every exon of the gene and
/// `aggregate` is set; for the exon level strategy it holds only the
/// exons below the cutoff and `aggregate` is `None`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedGene<'a> {
    pub gene: GeneId,
    pub aggregate: Option<GeneAggregate>,
    pub exons: Vec<&'a ExonRecord>,
}

pub trait GeneAggregator {
    ///
    /// Classify the genes of a coverage table, returning the suboptimal ones
    /// in the order they were first flagged.
    ///
    /// # Arguments
    /// - exons: exon records in input order
    fn flag<'a>(&self, exons: &'a [ExonRecord]) -> Result<Vec<FlaggedGene<'a>>, AggregateError>;

    fn strategy(&self) -> Strategy;

    fn cutoff(&self) -> f64;
}

///
/// Group exons by gene identity. Groups come out in order of each gene's
/// first appearance, and exons keep their relative input order.
///
pub fn group_by_gene(exons: &[ExonRecord]) -> Vec<GeneGroup<'_>> {
    let mut index: FxHashMap<&GeneId, usize> = FxHashMap::default();
    let mut groups: Vec<GeneGroup> = Vec::new();

    for exon in exons {
        match index.get(&exon.gene) {
            Some(&i) => groups[i].exons.push(exon),
            None => {
                index.insert(&exon.gene, groups.len());
                groups.push(GeneGroup {
                    gene: &exon.gene,
                    exons: vec![exon],
                });
            }
        }
    }

    groups
}

///
/// Unrounded length-weighted coverage percentage of one gene.
///
/// A gene with a single exon of non-zero length takes that exon's
/// percentage as is, so it classifies exactly like the exon itself.
///
pub fn weighted_percentage(group: &GeneGroup) -> Result<f64, AggregateError> {
    let total_length: u64 = group.exons.iter().map(|e| e.length()).sum();
    if total_length == 0 {
        return Err(AggregateError::DegenerateGene(group.gene.to_string()));
    }

    let measured: Vec<&ExonRecord> = group
        .exons
        .iter()
        .copied()
        .filter(|e| e.length() > 0)
        .collect();
    if let [only] = measured.as_slice() {
        return Ok(only.percentage);
    }

    let bases_above: f64 = measured.iter().map(|e| e.bases_above_threshold()).sum();
    Ok(bases_above / total_length as f64 * 100.0)
}

///
/// Summarise one gene: first exon's chromosome and start, the end chosen by
/// `end_policy`, and the length-weighted coverage percentage rounded for display.
///
pub fn summarize_gene(
    group: &GeneGroup,
    end_policy: EndPolicy,
) -> Result<GeneAggregate, AggregateError> {
    let (first, last) = match (group.exons.first(), group.exons.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(AggregateError::DegenerateGene(group.gene.to_string())),
    };

    let percentage = round_to(weighted_percentage(group)?, PERCENTAGE_DECIMALS);

    let zero_length = group.exons.iter().filter(|e| e.length() == 0).count();
    if zero_length > 0 {
        debug!("{} has {} zero-length exon(s)", group.gene, zero_length);
    }

    let end = match end_policy {
        EndPolicy::LastExonStart => last.start,
        EndPolicy::LastExonEnd => last.end,
    };

    Ok(GeneAggregate {
        chromosome: first.chromosome.clone(),
        start: first.start,
        end,
        gene: group.gene.clone(),
        percentage,
    })
}

///
/// Compute one aggregate per gene, in order of first appearance.
///
pub fn aggregate_genes(
    exons: &[ExonRecord],
    end_policy: EndPolicy,
) -> Result<Vec<GeneAggregate>, AggregateError> {
    let aggregates = group_by_gene(exons)
        .iter()
        .map(|group| summarize_gene(group, end_policy))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Aggregated {} exons into {} genes", exons.len(), aggregates.len());

    Ok(aggregates)
}

///
/// Flags genes whose length-weighted percentage falls below the cutoff.
///
#[derive(Debug, Clone)]
pub struct GeneLevelAggregator {
    pub cutoff: f64,
    pub end_policy: EndPolicy,
}

impl GeneLevelAggregator {
    pub fn new(cutoff: f64, end_policy: EndPolicy) -> Self {
        GeneLevelAggregator { cutoff, end_policy }
    }
}

impl GeneAggregator for GeneLevelAggregator {
    fn flag<'a>(&self, exons: &'a [ExonRecord]) -> Result<Vec<FlaggedGene<'a>>, AggregateError> {
        let groups = group_by_gene(exons);
        let total = groups.len();

        let mut flagged = Vec::new();
        for group in groups {
            // unrounded, a gene at 99.9962 is below 100 even though it reports 100.00
            if weighted_percentage(&group)? < self.cutoff {
                let aggregate = summarize_gene(&group, self.end_policy)?;
                flagged.push(FlaggedGene {
                    gene: group.gene.clone(),
                    aggregate: Some(aggregate),
                    exons: group.exons,
                });
            }
        }

        info!(
            "{} of {} genes below {}% (gene level)",
            flagged.len(),
            total,
            self.cutoff
        );

        Ok(flagged)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Gene
    }

    fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

///
/// Flags a gene as soon as any one of its exons falls below the cutoff.
///
#[derive(Debug, Clone)]
pub struct ExonLevelAggregator {
    pub cutoff: f64,
}

impl ExonLevelAggregator {
    pub fn new(cutoff: f64) -> Self {
        ExonLevelAggregator { cutoff }
    }
}

impl GeneAggregator for ExonLevelAggregator {
    fn flag<'a>(&self, exons: &'a [ExonRecord]) -> Result<Vec<FlaggedGene<'a>>, AggregateError> {
        let mut suboptimal = 0;
        let mut flagged: Vec<FlaggedGene<'a>> = Vec::new();
        let mut index: FxHashMap<&GeneId, usize> = FxHashMap::default();

        for exon in exons.iter().filter(|exon| exon.percentage < self.cutoff) {
            suboptimal += 1;
            match index.get(&exon.gene) {
                Some(&i) => flagged[i].exons.push(exon),
                None => {
                    index.insert(&exon.gene, flagged.len());
                    flagged.push(FlaggedGene {
                        gene: exon.gene.clone(),
                        aggregate: None,
                        exons: vec![exon],
                    });
                }
            }
        }

        info!(
            "{} genes with at least one exon below {}% ({} exons)",
            flagged.len(),
            self.cutoff,
            suboptimal
        );

        Ok(flagged)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Exon
    }

    fn cutoff(&self) -> f64 {
        self.cutoff
    }
}
