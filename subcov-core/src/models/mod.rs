pub mod exon;
pub mod exon_table;
pub mod gene;

// re-export for cleaner imports
pub use self::exon::ExonRecord;
pub use self::exon_table::ExonTable;
pub use self::gene::{GeneAggregate, GeneId};
