use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use flate2::Compression;
use flate2::write::GzEncoder;
use log::info;
use tempfile::NamedTempFile;

use subcov_aggregate::{FlaggedGene, Strategy};
use subcov_core::utils::get_dynamic_reader;

use crate::consts::{GENE_TABLE_HEADER, MISSING_VALUE};
use crate::error::{ReportError, Result};

///
/// Layout of the report body.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Tab separated rows: gene aggregates, or the flagged exons for the exon strategy.
    Table,
    /// One gene symbol per line.
    Symbols,
    /// Per gene block listing its exons with readable headers.
    Verbose,
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" | "tsv" => Ok(ReportFormat::Table),
            "symbols" | "list" => Ok(ReportFormat::Symbols),
            "verbose" => Ok(ReportFormat::Verbose),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Symbols => write!(f, "symbols"),
            ReportFormat::Verbose => write!(f, "verbose"),
        }
    }
}

///
/// Everything a report needs besides the flagged genes themselves.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub strategy: Strategy,
    pub coverage_threshold: u32,
    pub cutoff: f64,
    pub sample: Option<String>,
}

impl ReportContext {
    ///
    /// The report's first line: what was checked and for which sample.
    ///
    pub fn header_line(&self) -> String {
        let subject = match self.strategy {
            Strategy::Gene => "have",
            Strategy::Exon => "have at least one exon with",
        };
        let sample = self
            .sample
            .as_deref()
            .map_or(String::new(), |s| format!(" in sample {}", s));

        format!(
            "The genes listed below {} less than {}% of bases covered at {}x{}:",
            subject, self.cutoff, self.coverage_threshold, sample
        )
    }
}

///
/// A suboptimal-gene report ready to be written.
///
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub context: ReportContext,
    pub format: ReportFormat,
    pub genes: &'a [FlaggedGene<'a>],
}

impl<'a> Report<'a> {
    pub fn new(context: ReportContext, format: ReportFormat, genes: &'a [FlaggedGene<'a>]) -> Self {
        Report {
            context,
            format,
            genes,
        }
    }

    ///
    /// Write the report to any writer.
    ///
    /// The header line is always followed by one blank line, which is what
    /// [read_symbol_report] relies on to find the body.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.context.header_line())?;
        writeln!(out)?;

        match self.format {
            ReportFormat::Symbols => self.write_symbols(out),
            ReportFormat::Table => self.write_table(out),
            ReportFormat::Verbose => self.write_verbose(out),
        }
    }

    fn write_symbols<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for flagged in self.genes {
            writeln!(out, "{}", flagged.gene.symbol)?;
        }
        Ok(())
    }

    fn write_table<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self.context.strategy {
            Strategy::Gene => {
                writeln!(out, "{}", GENE_TABLE_HEADER)?;
                for aggregate in self.genes.iter().filter_map(|g| g.aggregate.as_ref()) {
                    writeln!(out, "{}", aggregate.as_string())?;
                }
            }
            Strategy::Exon => {
                writeln!(
                    out,
                    "chromosome\tStartPosition\tEndPosition\tGeneSymbol\tAccession\tpercentage{}",
                    self.context.coverage_threshold
                )?;
                for exon in self.genes.iter().flat_map(|g| g.exons.iter()) {
                    writeln!(out, "{}", exon.as_string())?;
                }
            }
        }
        Ok(())
    }

    fn write_verbose<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for flagged in self.genes {
            match &flagged.aggregate {
                Some(aggregate) => writeln!(
                    out,
                    "{}\t{:.2}% of bases covered",
                    flagged.gene.symbol, aggregate.percentage
                )?,
                None => writeln!(out, "{}", flagged.gene.symbol)?,
            }
            writeln!(
                out,
                "Exon_Genomic_Position\tGene_Transcript\tRead_Count\tMean_Coverage\tPercentage_>={}X",
                self.context.coverage_threshold
            )?;
            for exon in &flagged.exons {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    exon.position(),
                    exon.gene,
                    exon.read_count
                        .map_or(MISSING_VALUE.to_string(), |c| c.to_string()),
                    exon.mean_coverage
                        .map_or(MISSING_VALUE.to_string(), |c| c.to_string()),
                    exon.percentage
                )?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

pub trait ReportWrite {
    ///
    /// Write the report to disk as plain text
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_report<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;

    ///
    /// Write the report to disk gzip compressed
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_report_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;
}

///
/// Write a file by staging it next to `path` and renaming it into place, so
/// a failed write never leaves a truncated file at `path`.
///
pub fn write_atomically<T, F>(path: T, write: F) -> std::io::Result<()>
where
    T: AsRef<Path>,
    F: FnOnce(File) -> std::io::Result<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let staged = NamedTempFile::new_in(dir)?;
    write(staged.reopen()?)?;
    staged.persist(path).map_err(|e| e.error)?;

    Ok(())
}

impl ReportWrite for Report<'_> {
    fn write_report<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        write_atomically(path, |file| {
            let mut writer = BufWriter::new(file);
            self.write_to(&mut writer)?;
            writer.flush()
        })?;

        info!("Wrote {} genes to {}", self.genes.len(), path.display());
        Ok(())
    }

    fn write_report_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        write_atomically(path, |file| {
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
            self.write_to(&mut encoder)?;
            encoder.finish()?.flush()
        })?;

        info!("Wrote {} genes to {}", self.genes.len(), path.display());
        Ok(())
    }
}

///
/// Read the gene symbols back out of a symbol-only report.
///
/// Everything up to the first blank line is header; every non-empty line
/// after it is one symbol.
pub fn read_symbol_report<T: AsRef<Path>>(path: T) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path.as_ref()).map_err(|e| match e {
        subcov_core::CoverageTableError::FileRead { source, .. } => ReportError::Io(source),
        other => ReportError::Io(std::io::Error::other(other.to_string())),
    })?;

    let mut in_body = false;
    let mut symbols = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if !in_body {
            in_body = line.is_empty();
            continue;
        }
        if !line.is_empty() {
            symbols.push(line.to_string());
        }
    }

    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use subcov_aggregate::{EndPolicy, ExonLevelAggregator, GeneAggregator, GeneLevelAggregator};
    use subcov_core::models::{ExonRecord, GeneId};

    fn exon(gene: &str, start: u64, end: u64, percentage: f64) -> ExonRecord {
        let (symbol, accession) = gene.split_once(';').unwrap();
        ExonRecord {
            chromosome: "17".to_string(),
            start,
            end,
            gene: GeneId::new(symbol, accession),
            percentage,
            read_count: Some(310),
            mean_coverage: None,
        }
    }

    #[fixture]
    fn exons() -> Vec<ExonRecord> {
        vec![
            exon("BRCA1;NM_1", 100, 200, 100.0),
            exon("BRCA1;NM_1", 200, 250, 50.0),
            exon("TP53;NM_2", 300, 400, 100.0),
            exon("ATM;NM_3", 500, 600, 10.0),
        ]
    }

    fn context(strategy: Strategy) -> ReportContext {
        ReportContext {
            strategy,
            coverage_threshold: 30,
            cutoff: 100.0,
            sample: Some("S1_P1".to_string()),
        }
    }

    fn render(report: &Report) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        report.write_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[rstest]
    fn test_header_line() {
        assert_eq!(
            context(Strategy::Gene).header_line(),
            "The genes listed below have less than 100% of bases covered at 30x in sample S1_P1:"
        );

        let mut ctx = context(Strategy::Exon);
        ctx.sample = None;
        assert_eq!(
            ctx.header_line(),
            "The genes listed below have at least one exon with less than 100% of bases covered at 30x:"
        );
    }

    #[rstest]
    fn test_symbols(exons: Vec<ExonRecord>) {
        let flagged = GeneLevelAggregator::new(100.0, EndPolicy::LastExonStart)
            .flag(&exons)
            .unwrap();
        let report = Report::new(context(Strategy::Gene), ReportFormat::Symbols, &flagged);

        let rendered = render(&report);
        let body: Vec<&str> = rendered.lines().skip(2).collect();
        assert_eq!(body, vec!["BRCA1", "ATM"]);
    }

    #[rstest]
    fn test_gene_table(exons: Vec<ExonRecord>) {
        let flagged = GeneLevelAggregator::new(100.0, EndPolicy::LastExonStart)
            .flag(&exons)
            .unwrap();
        let report = Report::new(context(Strategy::Gene), ReportFormat::Table, &flagged);

        let rendered = render(&report);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], GENE_TABLE_HEADER);
        assert_eq!(lines[3], "17\t100\t200\tBRCA1\tNM_1\t83.33");
        assert_eq!(lines[4], "17\t500\t500\tATM\tNM_3\t10.00");
    }

    #[rstest]
    fn test_exon_table(exons: Vec<ExonRecord>) {
        let flagged = ExonLevelAggregator::new(100.0).flag(&exons).unwrap();
        let report = Report::new(context(Strategy::Exon), ReportFormat::Table, &flagged);

        let rendered = render(&report);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[2].ends_with("percentage30"));
        assert_eq!(lines[3], "17\t200\t250\tBRCA1\tNM_1\t50");
        assert_eq!(lines[4], "17\t500\t600\tATM\tNM_3\t10");
    }

    #[rstest]
    fn test_verbose(exons: Vec<ExonRecord>) {
        let flagged = ExonLevelAggregator::new(100.0).flag(&exons).unwrap();
        let report = Report::new(context(Strategy::Exon), ReportFormat::Verbose, &flagged);

        let rendered = render(&report);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "BRCA1");
        assert_eq!(
            lines[3],
            "Exon_Genomic_Position\tGene_Transcript\tRead_Count\tMean_Coverage\tPercentage_>=30X"
        );
        assert_eq!(lines[4], "17:200-250\tBRCA1;NM_1\t310\tNA\t50");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "ATM");
    }

    #[rstest]
    fn test_empty_report() {
        let flagged: Vec<FlaggedGene> = Vec::new();
        let report = Report::new(context(Strategy::Gene), ReportFormat::Symbols, &flagged);

        let rendered = render(&report);
        assert_eq!(rendered.lines().count(), 2);
    }

    #[rstest]
    #[case("symbols.txt")]
    #[case("symbols.txt.gz")]
    fn test_symbol_report_round_trip(exons: Vec<ExonRecord>, #[case] name: &str) {
        let flagged = ExonLevelAggregator::new(100.0).flag(&exons).unwrap();
        let report = Report::new(context(Strategy::Exon), ReportFormat::Symbols, &flagged);

        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("nested").join(name);

        match name.ends_with(".gz") {
            true => report.write_report_gz(&path).unwrap(),
            false => report.write_report(&path).unwrap(),
        }

        let symbols = read_symbol_report(&path).unwrap();
        let expected: Vec<String> = flagged.iter().map(|f| f.gene.symbol.clone()).collect();
        assert_eq!(symbols, expected);
    }

    #[rstest]
    fn test_failed_write_leaves_nothing_behind() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("report.txt");

        let result = write_atomically(&path, |mut file| {
            writeln!(file, "The genes listed below")?;
            Err(std::io::Error::other("disk full"))
        });

        assert!(result.is_err());
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(tempdir.path()).unwrap().count(), 0);
    }

    #[rstest]
    fn test_failed_write_keeps_previous_report(exons: Vec<ExonRecord>) {
        let flagged = ExonLevelAggregator::new(100.0).flag(&exons).unwrap();
        let report = Report::new(context(Strategy::Exon), ReportFormat::Symbols, &flagged);

        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("report.txt");
        report.write_report(&path).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let result = write_atomically(&path, |_| Err(std::io::Error::other("disk full")));

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[rstest]
    #[case("table", ReportFormat::Table)]
    #[case("Symbols", ReportFormat::Symbols)]
    #[case("verbose", ReportFormat::Verbose)]
    fn test_format_from_str(#[case] raw: &str, #[case] expected: ReportFormat) {
        assert_eq!(ReportFormat::from_str(raw).unwrap(), expected);
    }
}
