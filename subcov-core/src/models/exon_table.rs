use std::path::{Path, PathBuf};

use log::info;

use crate::errors::CoverageTableError;
use crate::loader::{LoaderOptions, read_exon_records};
use crate::models::ExonRecord;
use crate::utils::{get_dynamic_reader_w_stdin, sample_name_from_path};

///
/// ExonTable struct, the in-memory representation of a per-exon coverage report
///
#[derive(Clone, Debug)]
pub struct ExonTable {
    pub exons: Vec<ExonRecord>,
    pub coverage_column: String,
    pub path: Option<PathBuf>,
}

impl ExonTable {
    ///
    /// Load a coverage table from disk (`.gz` is decompressed, `-` reads stdin).
    ///
    /// # Arguments:
    /// - path: path to the coverage report
    /// - options: separator and read depth to load
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        options: &LoaderOptions,
    ) -> Result<Self, CoverageTableError> {
        let path = path.as_ref();
        let reader = get_dynamic_reader_w_stdin(path)?;
        let exons = read_exon_records(reader, options)?;

        info!(
            "Loaded {} exons from {} using {}",
            exons.len(),
            path.display(),
            options.coverage_column()
        );

        Ok(ExonTable {
            exons,
            coverage_column: options.coverage_column(),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn len(&self) -> usize {
        self.exons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exons.is_empty()
    }

    /// Sample name taken from the file name, if the table came from a file.
    pub fn sample_name(&self) -> Option<String> {
        self.path.as_deref().and_then(sample_name_from_path)
    }
}
