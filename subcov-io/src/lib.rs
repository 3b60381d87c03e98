//! # Input/Output utilities for coverage reports.
//!
//! Writes the suboptimal-gene report in one of three layouts (a gene table, a bare list of
//! gene symbols, or a verbose per-exon breakdown), optionally gzip compressed, and reads the
//! symbol list back. Also dumps per-gene statistics as TSV or JSON.
//!
pub mod consts;
pub mod error;
pub mod report;
pub mod stats;

// re-expose core functions
pub use consts::*;
pub use error::*;
pub use report::*;
pub use stats::*;
