use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use subcov_core::models::GeneAggregate;

use crate::consts::GENE_TABLE_HEADER;
use crate::error::Result;

///
/// Write every gene aggregate as a tab separated table with a header row.
///
pub fn write_gene_table<W: Write>(aggregates: &[GeneAggregate], out: &mut W) -> Result<()> {
    writeln!(out, "{}", GENE_TABLE_HEADER)?;
    for aggregate in aggregates {
        writeln!(out, "{}", aggregate.as_string())?;
    }
    Ok(())
}

///
/// Write every gene aggregate as a JSON array.
///
pub fn write_gene_json<W: Write>(aggregates: &[GeneAggregate], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, aggregates)?;
    writeln!(out)?;
    Ok(())
}

///
/// Dump gene statistics to a file, or stdout when no path is given.
///
/// # Arguments
/// - aggregates: gene aggregates to write
/// - path: destination; `None` writes to stdout
/// - json: write JSON instead of TSV
pub fn write_gene_stats(aggregates: &[GeneAggregate], path: Option<&Path>, json: bool) -> Result<()> {
    let mut out: Box<dyn Write> = match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    match json {
        true => write_gene_json(aggregates, &mut out)?,
        false => write_gene_table(aggregates, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use subcov_core::models::GeneId;

    #[fixture]
    fn aggregates() -> Vec<GeneAggregate> {
        vec![
            GeneAggregate {
                chromosome: "11".to_string(),
                start: 108098351,
                end: 108099904,
                gene: GeneId::new("ATM", "NM_000051.4"),
                percentage: 83.9,
            },
            GeneAggregate {
                chromosome: "16".to_string(),
                start: 23614779,
                end: 23614779,
                gene: GeneId::new("PALB2", "NM_024675.4"),
                percentage: 100.0,
            },
        ]
    }

    #[rstest]
    fn test_gene_table(aggregates: Vec<GeneAggregate>) {
        let mut buffer: Vec<u8> = Vec::new();
        write_gene_table(&aggregates, &mut buffer).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();

        assert_eq!(
            rendered.lines().collect::<Vec<_>>(),
            vec![
                GENE_TABLE_HEADER,
                "11\t108098351\t108099904\tATM\tNM_000051.4\t83.90",
                "16\t23614779\t23614779\tPALB2\tNM_024675.4\t100.00",
            ]
        );
    }

    #[rstest]
    fn test_gene_json(aggregates: Vec<GeneAggregate>) {
        let mut buffer: Vec<u8> = Vec::new();
        write_gene_json(&aggregates, &mut buffer).unwrap();

        let parsed: Vec<GeneAggregate> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, aggregates);
    }

    #[rstest]
    fn test_write_gene_stats_to_file(aggregates: Vec<GeneAggregate>) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out").join("stats.tsv");

        write_gene_stats(&aggregates, Some(path.as_path()), false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
    }
}
