use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use subcov_aggregate::aggregate_genes;
use subcov_core::ExonTable;
use subcov_io::write_gene_stats;

use crate::options::run_config_from_matches;

pub fn run_stats(matches: &ArgMatches) -> Result<()> {
    let file = matches
        .get_one::<String>("file")
        .expect("A path to a coverage table is required.");

    let config = run_config_from_matches(matches)?;
    let output = matches.get_one::<String>("output").map(Path::new);
    let json = matches.get_flag("json");

    let table = ExonTable::from_path(file, &config.loader)
        .with_context(|| format!("Failed to load coverage table: {}", file))?;

    let aggregates = aggregate_genes(&table.exons, config.aggregator.end_policy)
        .context("Failed to aggregate genes")?;

    write_gene_stats(&aggregates, output, json).context("Failed to write gene statistics")?;

    Ok(())
}
