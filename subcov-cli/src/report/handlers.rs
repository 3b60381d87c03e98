use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use subcov_core::ExonTable;
use subcov_core::utils::derive_output_path;
use subcov_io::{DEFAULT_REPORT_SUFFIX, Report, ReportContext, ReportFormat, ReportWrite};

use crate::options::run_config_from_matches;

pub fn run_report(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let file = matches
        .get_one::<String>("file")
        .expect("A path to a coverage table is required.");

    let config = run_config_from_matches(matches)?;

    let format = match (matches.get_flag("verbose"), matches.get_one::<String>("format")) {
        (true, _) => ReportFormat::Verbose,
        (false, Some(format)) => ReportFormat::from_str(format)?,
        (false, None) => ReportFormat::Table,
    };

    let output = match matches.get_one::<String>("output") {
        Some(output) => PathBuf::from(output),
        None => derive_output_path(Path::new(file), DEFAULT_REPORT_SUFFIX),
    };

    // everything is computed before the output is touched
    let table = ExonTable::from_path(file, &config.loader)
        .with_context(|| format!("Failed to load coverage table: {}", file))?;

    let aggregator = config.aggregator.aggregator();
    let flagged = aggregator
        .flag(&table.exons)
        .context("Failed to classify genes")?;

    let context = ReportContext {
        strategy: aggregator.strategy(),
        coverage_threshold: config.loader.coverage_threshold,
        cutoff: aggregator.cutoff(),
        sample: table.sample_name(),
    };
    let report = Report::new(context, format, &flagged);

    if output.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        report.write_to(&mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    let is_gzipped = output.extension().is_some_and(|ext| ext == "gz");
    let written = match is_gzipped {
        true => report.write_report_gz(&output),
        false => report.write_report(&output),
    };
    written.with_context(|| format!("Failed to write report: {}", output.display()))?;

    info!("{} suboptimal genes reported in {}", flagged.len(), output.display());

    Ok(())
}
