//! # Gene level coverage aggregation
//!
//! Groups exon coverage records by gene and decides which genes are suboptimally covered.
//! Two interchangeable strategies sit behind the [`GeneAggregator`] trait:
//!
//! - [`GeneLevelAggregator`]: length-weighted gene percentage compared against a cutoff.
//! - [`ExonLevelAggregator`]: a gene is flagged when any one of its exons is below the cutoff.
//!
pub mod aggregator;
pub mod config;
pub mod consts;
pub mod errors;
pub mod strategy;

// re-exports
pub use aggregator::*;
pub use config::*;
pub use errors::*;
pub use strategy::*;
