use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, arg};

use subcov_aggregate::{EndPolicy, RunConfig, Strategy};
use subcov_core::FieldSeparator;

///
/// Arguments shared by every subcommand that loads a coverage table.
///
pub fn loader_args() -> Vec<Arg> {
    vec![
        Arg::new("file")
            .required(true)
            .help("Per-exon coverage table (tsv, optionally .gz, or - for stdin)"),
        arg!(-t --threshold <threshold> "Read depth whose percentage column is used [default: 30]").required(false),
        arg!(--sep <sep> "Field separator: tab or whitespace [default: tab]").required(false),
        Arg::new("end-policy")
            .long("end-policy")
            .value_name("policy")
            .help("Report a gene's end as the last exon's start or end [default: start]"),
        arg!(--config <config> "TOML file with [loader] and [aggregator] settings").required(false),
    ]
}

fn value<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a String> {
    matches.try_get_one::<String>(id).ok().flatten()
}

///
/// Resolve the run configuration: config file first, explicit flags on top.
///
pub fn run_config_from_matches(matches: &ArgMatches) -> Result<RunConfig> {
    let mut config = match value(matches, "config") {
        Some(path) => RunConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => RunConfig::default(),
    };

    if let Some(threshold) = value(matches, "threshold") {
        config.loader.coverage_threshold = threshold
            .parse()
            .context("--threshold must be a non-negative integer")?;
    }

    if let Some(sep) = value(matches, "sep") {
        config.loader.separator = FieldSeparator::from_str(sep).map_err(anyhow::Error::msg)?;
    }

    if let Some(cutoff) = value(matches, "cutoff") {
        config.aggregator.cutoff = cutoff.parse().context("--cutoff must be a number")?;
    }

    if let Some(mode) = value(matches, "mode") {
        config.aggregator.strategy = match Strategy::from_str(mode) {
            Ok(mode) => mode,
            Err(_err) => anyhow::bail!("Unknown aggregation mode supplied: {}", mode),
        };
    }

    if let Some(policy) = value(matches, "end-policy") {
        config.aggregator.end_policy = EndPolicy::from_str(policy).map_err(anyhow::Error::msg)?;
    }

    Ok(config)
}
