use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageTableError {
    #[error("Can't read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Required column absent: {0}")]
    MissingColumn(String),

    #[error("Error parsing {column} on line {line}: {value:?} is not a valid number")]
    InvalidNumber {
        column: String,
        line: usize,
        value: String,
    },

    #[error("Error parsing gene identity on line {line}: {value:?} is not of the form <symbol>;<accession>")]
    InvalidGeneIdentity { line: usize, value: String },

    #[error("Line {line} has {found} fields, the header has {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("End position {end} is before start position {start} on line {line}")]
    InvertedInterval { line: usize, start: u64, end: u64 },

    #[error("Coverage table has no header line")]
    MissingHeader,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
