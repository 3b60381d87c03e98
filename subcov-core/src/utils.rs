use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::consts::COVERAGE_COLUMN_PREFIX;
use crate::errors::CoverageTableError;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>, CoverageTableError> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).map_err(|source| CoverageTableError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(path: &Path) -> Result<BufReader<Box<dyn Read>>, CoverageTableError> {
    if path.as_os_str() == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(path)
    }
}

///
/// Name of the coverage column for a read depth, e.g. `percentage30`.
///
pub fn coverage_column_name(threshold: u32) -> String {
    format!("{}{}", COVERAGE_COLUMN_PREFIX, threshold)
}

///
/// Round a value to a fixed number of decimal places.
///
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

///
/// Derive the sample (or sample/panel) name from a coverage file path.
///
/// The name is everything in the file name before the first `.`, so
/// `NGS123_Pan4000.per-exon.bed.gz` yields `NGS123_Pan4000`. Returns `None`
/// for stdin or a path without a usable file name.
///
pub fn sample_name_from_path(path: &Path) -> Option<String> {
    if path.as_os_str() == "-" {
        return None;
    }

    let filename = path.file_name()?.to_str()?;
    let name = filename.split('.').next().unwrap_or_default();

    match name.is_empty() {
        true => None,
        false => Some(name.to_string()),
    }
}

///
/// Default report path for an input file: `<sample>.<suffix>` next to the input.
///
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let name = sample_name_from_path(input).unwrap_or_else(|| "subcov".to_string());
    let file_name = format!("{}.{}", name, suffix);

    match input.parent() {
        Some(parent) if input.as_os_str() != "-" => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(30, "percentage30")]
    #[case(100, "percentage100")]
    fn test_coverage_column_name(#[case] threshold: u32, #[case] expected: &str) {
        assert_eq!(coverage_column_name(threshold), expected);
    }

    #[rstest]
    #[case(83.33333, 83.33)]
    #[case(99.996, 100.0)]
    #[case(0.0, 0.0)]
    #[case(12.345001, 12.35)]
    fn test_round_to(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round_to(value, 2), expected);
    }

    #[rstest]
    #[case("data/NGS123_Pan4000.per-exon.bed.gz", Some("NGS123_Pan4000"))]
    #[case("sample", Some("sample"))]
    #[case(".hidden", None)]
    #[case("-", None)]
    fn test_sample_name_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            sample_name_from_path(Path::new(path)),
            expected.map(|s| s.to_string())
        );
    }

    #[rstest]
    fn test_derive_output_path() {
        let derived = derive_output_path(Path::new("runs/S1_P1.sambamba.tsv"), "suboptimal.txt");
        assert_eq!(derived, PathBuf::from("runs/S1_P1.suboptimal.txt"));

        let derived = derive_output_path(Path::new("-"), "suboptimal.txt");
        assert_eq!(derived, PathBuf::from("subcov.suboptimal.txt"));
    }

    #[rstest]
    fn test_missing_file_is_file_read_error() {
        let result = get_dynamic_reader(Path::new("does/not/exist.tsv"));
        assert!(matches!(result, Err(CoverageTableError::FileRead { .. })));
    }
}
