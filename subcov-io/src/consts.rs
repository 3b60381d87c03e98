pub const DEFAULT_REPORT_SUFFIX: &str = "suboptimal.txt";
pub const MISSING_VALUE: &str = "NA";

/// Header row shared by the gene report table and `stats` output.
pub const GENE_TABLE_HEADER: &str =
    "chromosome\tStartPosition\tEndPosition\tGeneSymbol\tAccession\tgenePercentage";
