use std::fmt::{self, Display};
use std::io::BufRead;
use std::str::FromStr;

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::errors::CoverageTableError;
use crate::models::{ExonRecord, GeneId};
use crate::utils::coverage_column_name;

///
/// How fields are separated in the coverage table.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldSeparator {
    /// A single tab between fields.
    #[default]
    Tab,
    /// One or more whitespace characters, for tables with mixed tabs and spaces.
    Whitespace,
}

impl FieldSeparator {
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            FieldSeparator::Tab => line.split('\t').map(str::trim).collect(),
            FieldSeparator::Whitespace => line.split_whitespace().collect(),
        }
    }
}

impl FromStr for FieldSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tab" | "\\t" | "\t" => Ok(FieldSeparator::Tab),
            "whitespace" | "ws" | "space" => Ok(FieldSeparator::Whitespace),
            _ => Err(format!("Unknown field separator: {}", s)),
        }
    }
}

impl Display for FieldSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSeparator::Tab => write!(f, "tab"),
            FieldSeparator::Whitespace => write!(f, "whitespace"),
        }
    }
}

///
/// Everything the loader needs to know about the table it reads.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoaderOptions {
    pub separator: FieldSeparator,

    /// Read depth whose `percentage<N>` column is loaded.
    pub coverage_threshold: u32,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions {
            separator: FieldSeparator::Tab,
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
        }
    }
}

impl LoaderOptions {
    pub fn new(separator: FieldSeparator, coverage_threshold: u32) -> Self {
        LoaderOptions {
            separator,
            coverage_threshold,
        }
    }

    pub fn coverage_column(&self) -> String {
        coverage_column_name(self.coverage_threshold)
    }
}

/// Column indices resolved from the header line.
#[derive(Debug)]
struct ColumnLayout {
    chromosome: usize,
    start: usize,
    start_name: String,
    end: usize,
    gene: usize,
    percentage: usize,
    read_count: Option<usize>,
    mean_coverage: Option<usize>,
    width: usize,
}

impl ColumnLayout {
    fn from_header(fields: &[&str], coverage_column: &str) -> Result<Self, CoverageTableError> {
        let start = require_column(fields, START_COLUMNS)?;

        Ok(ColumnLayout {
            chromosome: require_column(fields, CHROMOSOME_COLUMNS)?,
            start,
            start_name: fields[start].to_string(),
            end: require_column(fields, &[END_COLUMN])?,
            gene: require_column(fields, &[GENE_IDENTITY_COLUMN])?,
            percentage: require_column(fields, &[coverage_column])?,
            read_count: find_column(fields, &[READ_COUNT_COLUMN]),
            mean_coverage: find_column(fields, &[MEAN_COVERAGE_COLUMN]),
            width: fields.len(),
        })
    }
}

fn find_column(fields: &[&str], names: &[&str]) -> Option<usize> {
    fields.iter().position(|f| names.contains(f))
}

fn require_column(fields: &[&str], names: &[&str]) -> Result<usize, CoverageTableError> {
    find_column(fields, names).ok_or_else(|| CoverageTableError::MissingColumn(names.join(" or ")))
}

fn parse_number<T: FromStr>(value: &str, column: &str, line: usize) -> Result<T, CoverageTableError> {
    value.parse::<T>().map_err(|_| CoverageTableError::InvalidNumber {
        column: column.to_string(),
        line,
        value: value.to_string(),
    })
}

/// `str::parse` accepts `NaN` and `inf`, neither of which is a coverage value.
fn parse_finite(value: &str, column: &str, line: usize) -> Result<f64, CoverageTableError> {
    let parsed: f64 = parse_number(value, column, line)?;
    match parsed.is_finite() {
        true => Ok(parsed),
        false => Err(CoverageTableError::InvalidNumber {
            column: column.to_string(),
            line,
            value: value.to_string(),
        }),
    }
}

///
/// Parse a coverage table into exon records, preserving row order.
///
/// The first non-blank line is the header. Rows are matched to columns by
/// name, so column order and any extra columns do not matter.
///
/// # Arguments
/// - reader: buffered reader over the table
/// - options: separator and read depth to load
pub fn read_exon_records<R: BufRead>(
    reader: R,
    options: &LoaderOptions,
) -> Result<Vec<ExonRecord>, CoverageTableError> {
    let coverage_column = options.coverage_column();
    let mut layout: Option<ColumnLayout> = None;
    let mut exons: Vec<ExonRecord> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            continue;
        }

        let fields = options.separator.split(line);

        let columns = match &layout {
            Some(columns) => columns,
            None => {
                let columns = ColumnLayout::from_header(&fields, &coverage_column)?;
                debug!("Resolved coverage table columns: {:?}", columns);
                layout = Some(columns);
                continue;
            }
        };

        if fields.len() < columns.width {
            return Err(CoverageTableError::RaggedRow {
                line: line_num,
                expected: columns.width,
                found: fields.len(),
            });
        }

        let gene = GeneId::from_str(fields[columns.gene]).map_err(|_| {
            CoverageTableError::InvalidGeneIdentity {
                line: line_num,
                value: fields[columns.gene].to_string(),
            }
        })?;

        let start: u64 = parse_number(fields[columns.start], &columns.start_name, line_num)?;
        let end: u64 = parse_number(fields[columns.end], END_COLUMN, line_num)?;
        if end < start {
            return Err(CoverageTableError::InvertedInterval {
                line: line_num,
                start,
                end,
            });
        }

        let percentage = parse_finite(fields[columns.percentage], &coverage_column, line_num)?;
        if !(0.0..=100.0).contains(&percentage) {
            warn!(
                "{} on line {} is outside [0, 100]: {}",
                coverage_column, line_num, percentage
            );
        }

        let read_count = columns
            .read_count
            .map(|i| parse_number::<u64>(fields[i], READ_COUNT_COLUMN, line_num))
            .transpose()?;
        let mean_coverage = columns
            .mean_coverage
            .map(|i| parse_finite(fields[i], MEAN_COVERAGE_COLUMN, line_num))
            .transpose()?;

        exons.push(ExonRecord {
            chromosome: fields[columns.chromosome].to_string(),
            start,
            end,
            gene,
            percentage,
            read_count,
            mean_coverage,
        });
    }

    if layout.is_none() {
        return Err(CoverageTableError::MissingHeader);
    }

    Ok(exons)
}
