pub const DEFAULT_COVERAGE_THRESHOLD: u32 = 30;
pub const COVERAGE_COLUMN_PREFIX: &str = "percentage";

pub const CHROMOSOME_COLUMNS: &[&str] = &["#chromosome", "chromosome"];
pub const START_COLUMNS: &[&str] = &["StartPosition", "FullPosition"];
pub const END_COLUMN: &str = "EndPosition";
pub const GENE_IDENTITY_COLUMN: &str = "GeneSymbol;Accession";
pub const READ_COUNT_COLUMN: &str = "readCount";
pub const MEAN_COVERAGE_COLUMN: &str = "meanCoverage";

pub const GENE_IDENTITY_DELIMITER: char = ';';
