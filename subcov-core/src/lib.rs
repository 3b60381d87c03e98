//! # Core models for subcov
//!
//! Types shared across the workspace: the exon coverage table, gene identities and per-gene
//! aggregates, plus the loader that turns a per-exon coverage report (as written by sambamba
//! and similar depth tools) into an [`ExonTable`](models::ExonTable).
//!
pub mod consts;
pub mod errors;
pub mod loader;
pub mod models;
pub mod utils;

// re-expose core types
pub use errors::CoverageTableError;
pub use loader::{FieldSeparator, LoaderOptions, read_exon_records};
pub use models::{ExonRecord, ExonTable, GeneAggregate, GeneId};
